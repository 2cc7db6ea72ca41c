use std::collections::HashMap;

use diesel::dsl::count_star;
use diesel::prelude::*;

use crate::domain::post::{NewPost, Post, UpdatePost};
use crate::domain::types::PostId;
use crate::models::post::{NewPost as DbNewPost, PostChangeset, PostJoinRow};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, PostListQuery, PostReader, PostWriter};

impl DieselRepository {
    /// Comment totals for the given post ids; posts without comments are
    /// absent from the map.
    fn comment_counts(
        &self,
        conn: &mut crate::db::DbConnection,
        post_ids: &[i32],
    ) -> RepositoryResult<HashMap<i32, i64>> {
        use crate::schema::comments;

        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let counts = comments::table
            .filter(comments::post_id.eq_any(post_ids))
            .group_by(comments::post_id)
            .select((comments::post_id, count_star()))
            .load::<(i32, i64)>(conn)?
            .into_iter()
            .collect();

        Ok(counts)
    }
}

impl PostReader for DieselRepository {
    fn list_posts(&self, query: PostListQuery) -> RepositoryResult<(usize, Vec<Post>)> {
        use crate::schema::{categories, locations, posts, users};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = posts::table
                .inner_join(users::table)
                .left_join(categories::table)
                .left_join(locations::table)
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(author_id) = query.author_id {
                items = items.filter(posts::author_id.eq(author_id.get()));
            }
            if let Some(category_id) = query.category_id {
                items = items.filter(posts::category_id.eq(category_id.get()));
            }
            if let Some(now) = query.published_at {
                items = items.filter(
                    posts::is_published
                        .eq(true)
                        .and(posts::pub_date.le(now))
                        .and(
                            posts::category_id
                                .is_null()
                                .or(categories::is_published.eq(true)),
                        ),
                );
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let rows = items
            .order(posts::pub_date.desc())
            .load::<PostJoinRow>(&mut conn)?;

        let ids = rows.iter().map(|(post, ..)| post.id).collect::<Vec<_>>();
        let counts = self.comment_counts(&mut conn, &ids)?;

        let items = rows
            .into_iter()
            .map(|row| {
                let count = counts.get(&row.0.id).copied().unwrap_or(0);
                Post::from_join_row(row, count)
            })
            .collect::<Result<Vec<Post>, _>>()?;

        Ok((total, items))
    }

    fn get_post_by_id(&self, id: PostId) -> RepositoryResult<Option<Post>> {
        use crate::schema::{categories, locations, posts, users};

        let mut conn = self.conn()?;

        let row = posts::table
            .inner_join(users::table)
            .left_join(categories::table)
            .left_join(locations::table)
            .filter(posts::id.eq(id.get()))
            .first::<PostJoinRow>(&mut conn)
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        let counts = self.comment_counts(&mut conn, &[row.0.id])?;
        let count = counts.get(&row.0.id).copied().unwrap_or(0);

        Ok(Some(Post::from_join_row(row, count)?))
    }
}

impl PostWriter for DieselRepository {
    fn create_post(&self, post: &NewPost) -> RepositoryResult<PostId> {
        use crate::schema::posts;

        let mut conn = self.conn()?;
        let db_post: DbNewPost = post.clone().into();

        let id = diesel::insert_into(posts::table)
            .values(db_post)
            .returning(posts::id)
            .get_result::<i32>(&mut conn)?;

        Ok(PostId::new(id)?)
    }

    fn update_post(&self, id: PostId, update: &UpdatePost) -> RepositoryResult<usize> {
        use crate::schema::posts;

        let mut conn = self.conn()?;
        let changeset: PostChangeset = update.clone().into();

        let affected = diesel::update(posts::table.filter(posts::id.eq(id.get())))
            .set(changeset)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_post(&self, id: PostId) -> RepositoryResult<usize> {
        use crate::schema::posts;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(posts::table.filter(posts::id.eq(id.get()))).execute(&mut conn)?;

        Ok(affected)
    }
}
