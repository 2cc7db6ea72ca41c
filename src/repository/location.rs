use diesel::prelude::*;

use crate::domain::location::Location;
use crate::models::location::Location as DbLocation;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, LocationReader};

impl LocationReader for DieselRepository {
    fn list_locations(&self) -> RepositoryResult<Vec<Location>> {
        use crate::schema::locations;

        let mut conn = self.conn()?;

        let items = locations::table
            .filter(locations::is_published.eq(true))
            .order(locations::name.asc())
            .load::<DbLocation>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Location>, _>>()?;

        Ok(items)
    }
}
