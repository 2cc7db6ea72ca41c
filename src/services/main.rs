use chrono::Utc;

use crate::dto::categories::CategoryDto;
use crate::dto::posts::PostDto;
use crate::pagination::Paginated;
use crate::repository::{CategoryReader, PostListQuery, PostReader};

use super::{ServiceError, ServiceResult};

/// Published posts for the front page, newest first.
pub fn show_index<R>(page: usize, per_page: usize, repo: &R) -> ServiceResult<Paginated<PostDto>>
where
    R: PostReader,
{
    let now = Utc::now().naive_utc();
    let query = PostListQuery::default()
        .published_at(now)
        .paginate(page, per_page);

    match repo.list_posts(query) {
        Ok((total, posts)) => Ok(Paginated::new(
            posts.into_iter().map(PostDto::from).collect(),
            page,
            total.div_ceil(per_page),
        )),
        Err(e) => {
            log::error!("Failed to list posts: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// A visible category page with its published posts.
pub fn show_category<R>(
    slug: &str,
    page: usize,
    per_page: usize,
    repo: &R,
) -> ServiceResult<(CategoryDto, Paginated<PostDto>)>
where
    R: CategoryReader + PostReader,
{
    let category = match repo.get_category_by_slug(slug) {
        Ok(Some(category)) if category.is_published => category,
        Ok(_) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category by slug: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let now = Utc::now().naive_utc();
    let query = PostListQuery::default()
        .category(category.id)
        .published_at(now)
        .paginate(page, per_page);

    let posts = match repo.list_posts(query) {
        Ok((total, posts)) => Paginated::new(
            posts.into_iter().map(PostDto::from).collect(),
            page,
            total.div_ceil(per_page),
        ),
        Err(e) => {
            log::error!("Failed to list category posts: {e}");
            return Err(ServiceError::Internal);
        }
    };

    Ok((category.into(), posts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::post::{Post, PostCategory};
    use crate::domain::types::{
        CategoryDescription, CategoryId, CategorySlug, CategoryTitle, PostBody, PostId, PostTitle,
        UserId, Username,
    };
    use crate::repository::test::TestRepository;
    use chrono::Duration;

    fn sample_category(id: i32, slug: &str, is_published: bool) -> Category {
        Category {
            id: CategoryId::new(id).unwrap(),
            title: CategoryTitle::new("Travel").unwrap(),
            description: CategoryDescription::new("Road notes").unwrap(),
            slug: CategorySlug::new(slug).unwrap(),
            is_published,
            created_at: Utc::now().naive_utc(),
        }
    }

    fn sample_post(id: i32, pub_offset_hours: i64, is_published: bool) -> Post {
        let now = Utc::now().naive_utc();
        Post {
            id: PostId::new(id).unwrap(),
            title: PostTitle::new(format!("post {id}")).unwrap(),
            body: PostBody::new("text").unwrap(),
            image: None,
            pub_date: now + Duration::hours(pub_offset_hours),
            author_id: UserId::new(1).unwrap(),
            author: Username::new("author").unwrap(),
            location_id: None,
            location: None,
            category: None,
            is_published,
            created_at: now,
            comment_count: 0,
        }
    }

    #[test]
    fn index_hides_unpublished_and_scheduled_posts() {
        let repo = TestRepository::new().with_posts(vec![
            sample_post(1, -1, true),
            sample_post(2, 1, true),
            sample_post(3, -1, false),
        ]);

        let page = show_index(1, 10, &repo).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, 1);
    }

    #[test]
    fn index_pagination_reports_total_pages() {
        let posts = (1..=7).map(|id| sample_post(id, -id as i64, true)).collect();
        let repo = TestRepository::new().with_posts(posts);

        let page = show_index(1, 3, &repo).unwrap();
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total_pages, 3);
        // Newest publication first.
        assert_eq!(page.items[0].id, 1);

        let value: serde_json::Value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["page"], 1);
        assert_eq!(value["items"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn hidden_category_page_is_not_found() {
        let repo =
            TestRepository::new().with_categories(vec![sample_category(1, "travel", false)]);

        let err = show_category("travel", 1, 10, &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[test]
    fn category_page_lists_only_its_published_posts() {
        let category = sample_category(1, "travel", true);
        let mut in_category = sample_post(1, -1, true);
        in_category.category = Some(PostCategory {
            id: category.id,
            title: category.title.clone(),
            slug: category.slug.clone(),
            is_published: true,
        });
        let repo = TestRepository::new()
            .with_categories(vec![category])
            .with_posts(vec![in_category, sample_post(2, -1, true)]);

        let (dto, page) = show_category("travel", 1, 10, &repo).unwrap();
        assert_eq!(dto.slug, "travel");
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, 1);
    }
}
