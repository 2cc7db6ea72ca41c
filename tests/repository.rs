use chrono::{Duration, Utc};
use chronicle::domain::comment::NewComment;
use chronicle::domain::post::NewPost;
use chronicle::domain::types::{
    CategoryId, CommentBody, EmailAddress, LocationId, PostBody, PostTitle, UserId, Username,
};
use chronicle::domain::user::{NewUser, User};
use chronicle::repository::{
    CategoryReader, CommentReader, CommentWriter, DieselRepository, LocationReader, PostListQuery,
    PostReader, PostWriter, UserReader, UserWriter,
};
use chronicle::schema::{categories, locations};
use diesel::prelude::*;

mod common;

fn create_user(repo: &DieselRepository, username: &str) -> User {
    let new_user = NewUser {
        username: Username::new(username).expect("valid username"),
        email: EmailAddress::new(format!("{username}@example.com")).expect("valid email"),
        password_hash: "$argon2id$stub".to_string(),
        first_name: String::new(),
        last_name: String::new(),
    };
    repo.create_user(&new_user).expect("should create user")
}

fn insert_category(pool: &chronicle::db::DbPool, slug: &str, is_published: bool) -> CategoryId {
    let mut conn = pool.get().expect("should acquire DB connection");
    let id = diesel::insert_into(categories::table)
        .values((
            categories::title.eq(format!("Category {slug}")),
            categories::description.eq("description"),
            categories::slug.eq(slug),
            categories::is_published.eq(is_published),
        ))
        .returning(categories::id)
        .get_result::<i32>(&mut conn)
        .expect("should create category");
    CategoryId::new(id).expect("valid category id")
}

fn insert_location(pool: &chronicle::db::DbPool, name: &str, is_published: bool) -> LocationId {
    let mut conn = pool.get().expect("should acquire DB connection");
    let id = diesel::insert_into(locations::table)
        .values((
            locations::name.eq(name),
            locations::is_published.eq(is_published),
        ))
        .returning(locations::id)
        .get_result::<i32>(&mut conn)
        .expect("should create location");
    LocationId::new(id).expect("valid location id")
}

fn new_post(
    author_id: UserId,
    title: &str,
    pub_offset_hours: i64,
    is_published: bool,
    category_id: Option<CategoryId>,
) -> NewPost {
    NewPost {
        title: PostTitle::new(title).expect("valid title"),
        body: PostBody::new("text").expect("valid body"),
        image: None,
        pub_date: Utc::now().naive_utc() + Duration::hours(pub_offset_hours),
        author_id,
        location_id: None,
        category_id,
        is_published,
    }
}

#[test]
fn user_crud_round_trip() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let user = create_user(&repo, "ivan");
    assert_eq!(user.username.as_str(), "ivan");

    let by_name = repo
        .get_user_by_username("ivan")
        .expect("should query user")
        .expect("user should exist");
    assert_eq!(by_name.id, user.id);

    let by_email = repo
        .get_user_by_email("ivan@example.com")
        .expect("should query user")
        .expect("user should exist");
    assert_eq!(by_email.id, user.id);

    let affected = repo
        .update_user_profile(
            user.id,
            &Username::new("ivan2").unwrap(),
            &EmailAddress::new("ivan2@example.com").unwrap(),
            "Ivan",
            "Petrov",
        )
        .expect("should update profile");
    assert_eq!(affected, 1);

    let updated = repo
        .get_user_by_id(user.id)
        .expect("should query user")
        .expect("user should exist");
    assert_eq!(updated.username.as_str(), "ivan2");
    assert_eq!(updated.first_name, "Ivan");
}

#[test]
fn duplicate_username_is_a_unique_violation() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    create_user(&repo, "ivan");

    let duplicate = NewUser {
        username: Username::new("ivan").unwrap(),
        email: EmailAddress::new("other@example.com").unwrap(),
        password_hash: "$argon2id$stub".to_string(),
        first_name: String::new(),
        last_name: String::new(),
    };
    let err = repo.create_user(&duplicate).unwrap_err();
    assert!(err.is_unique_violation());
}

#[test]
fn published_filter_hides_drafts_scheduled_and_hidden_categories() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let author = create_user(&repo, "writer");
    let visible_category = insert_category(&test_db.pool(), "north-trail", true);
    let hidden_category = insert_category(&test_db.pool(), "vault", false);

    repo.create_post(&new_post(author.id, "visible", -1, true, None))
        .expect("should create post");
    repo.create_post(&new_post(author.id, "draft", -1, false, None))
        .expect("should create post");
    repo.create_post(&new_post(author.id, "scheduled", 5, true, None))
        .expect("should create post");
    repo.create_post(&new_post(
        author.id,
        "categorized",
        -1,
        true,
        Some(visible_category),
    ))
    .expect("should create post");
    repo.create_post(&new_post(
        author.id,
        "buried",
        -1,
        true,
        Some(hidden_category),
    ))
    .expect("should create post");

    let now = Utc::now().naive_utc();
    let (total, posts) = repo
        .list_posts(PostListQuery::default().published_at(now))
        .expect("should list posts");

    assert_eq!(total, 2);
    let titles = posts
        .iter()
        .map(|p| p.title.as_str().to_string())
        .collect::<Vec<_>>();
    assert!(titles.contains(&"visible".to_string()));
    assert!(titles.contains(&"categorized".to_string()));

    // Without the filter the author's full history is there.
    let (all, _) = repo
        .list_posts(PostListQuery::default().author(author.id))
        .expect("should list posts");
    assert_eq!(all, 5);
}

#[test]
fn list_posts_orders_by_pub_date_and_paginates() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let author = create_user(&repo, "writer");
    for hour in 1..=5 {
        repo.create_post(&new_post(
            author.id,
            &format!("post {hour}"),
            -hour,
            true,
            None,
        ))
        .expect("should create post");
    }

    let now = Utc::now().naive_utc();
    let (total, page) = repo
        .list_posts(
            PostListQuery::default()
                .published_at(now)
                .paginate(1, 2),
        )
        .expect("should list posts");

    assert_eq!(total, 5);
    assert_eq!(page.len(), 2);
    // Newest publication first.
    assert_eq!(page[0].title.as_str(), "post 1");
    assert_eq!(page[1].title.as_str(), "post 2");

    let (_, last_page) = repo
        .list_posts(
            PostListQuery::default()
                .published_at(now)
                .paginate(3, 2),
        )
        .expect("should list posts");
    assert_eq!(last_page.len(), 1);
    assert_eq!(last_page[0].title.as_str(), "post 5");
}

#[test]
fn post_carries_joined_names_and_comment_count() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let author = create_user(&repo, "writer");
    let reader = create_user(&repo, "reader");
    let category = insert_category(&test_db.pool(), "north-trail", true);

    let post_id = repo
        .create_post(&new_post(author.id, "with comments", -1, true, Some(category)))
        .expect("should create post");

    for text in ["first", "second"] {
        repo.create_comment(&NewComment {
            post_id,
            author_id: reader.id,
            body: CommentBody::new(text).unwrap(),
        })
        .expect("should create comment");
    }

    let post = repo
        .get_post_by_id(post_id)
        .expect("should query post")
        .expect("post should exist");
    assert_eq!(post.author.as_str(), "writer");
    assert_eq!(
        post.category.as_ref().map(|c| c.slug.as_str()),
        Some("north-trail")
    );
    assert_eq!(post.comment_count, 2);

    let comments = repo
        .list_comments(post_id)
        .expect("should list comments");
    assert_eq!(comments.len(), 2);
    // Creation order.
    assert_eq!(comments[0].body.as_str(), "first");
    assert_eq!(comments[1].body.as_str(), "second");
    assert_eq!(comments[0].author.as_str(), "reader");
}

#[test]
fn update_post_replaces_fields_and_can_clear_category() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let author = create_user(&repo, "writer");
    let category = insert_category(&test_db.pool(), "north-trail", true);

    let post_id = repo
        .create_post(&new_post(author.id, "before", -1, true, Some(category)))
        .expect("should create post");

    let update = chronicle::domain::post::UpdatePost {
        title: PostTitle::new("after").unwrap(),
        body: PostBody::new("new text").unwrap(),
        image: None,
        pub_date: Utc::now().naive_utc() - Duration::hours(2),
        location_id: None,
        category_id: None,
        is_published: false,
    };
    let affected = repo
        .update_post(post_id, &update)
        .expect("should update post");
    assert_eq!(affected, 1);

    let post = repo
        .get_post_by_id(post_id)
        .expect("should query post")
        .expect("post should exist");
    assert_eq!(post.title.as_str(), "after");
    assert!(post.category.is_none());
    assert!(!post.is_published);
}

#[test]
fn deleting_a_post_cascades_its_comments() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let author = create_user(&repo, "writer");
    let post_id = repo
        .create_post(&new_post(author.id, "short lived", -1, true, None))
        .expect("should create post");
    repo.create_comment(&NewComment {
        post_id,
        author_id: author.id,
        body: CommentBody::new("gone soon").unwrap(),
    })
    .expect("should create comment");

    let affected = repo.delete_post(post_id).expect("should delete post");
    assert_eq!(affected, 1);

    assert!(
        repo.get_post_by_id(post_id)
            .expect("should query post")
            .is_none()
    );
    assert!(
        repo.list_comments(post_id)
            .expect("should list comments")
            .is_empty()
    );
}

#[test]
fn deleting_a_category_nulls_the_reference_on_posts() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let author = create_user(&repo, "writer");
    let category = insert_category(&test_db.pool(), "north-trail", true);
    let post_id = repo
        .create_post(&new_post(author.id, "uncategorized soon", -1, true, Some(category)))
        .expect("should create post");

    let mut conn = test_db.pool().get().expect("should acquire DB connection");
    diesel::delete(categories::table.filter(categories::id.eq(category.get())))
        .execute(&mut conn)
        .expect("should delete category");

    let post = repo
        .get_post_by_id(post_id)
        .expect("should query post")
        .expect("post should survive category deletion");
    assert!(post.category.is_none());
}

#[test]
fn hidden_categories_and_locations_are_not_listed() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    insert_category(&test_db.pool(), "north-trail", true);
    insert_category(&test_db.pool(), "vault", false);
    insert_location(&test_db.pool(), "Canyon", true);
    insert_location(&test_db.pool(), "Atlantis", false);

    let category_slugs = repo
        .list_categories()
        .expect("should list categories")
        .into_iter()
        .map(|c| c.slug.as_str().to_string())
        .collect::<Vec<_>>();
    assert!(category_slugs.contains(&"north-trail".to_string()));
    assert!(!category_slugs.contains(&"vault".to_string()));

    // The slug lookup still resolves hidden categories; visibility is the
    // caller's concern.
    assert!(
        repo.get_category_by_slug("vault")
            .expect("should query category")
            .is_some()
    );

    let location_names = repo
        .list_locations()
        .expect("should list locations")
        .into_iter()
        .map(|l| l.name.as_str().to_string())
        .collect::<Vec<_>>();
    assert!(location_names.contains(&"Canyon".to_string()));
    assert!(!location_names.contains(&"Atlantis".to_string()));
}
