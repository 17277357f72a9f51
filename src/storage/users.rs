use diesel::prelude::*;
use diesel::upsert::excluded;

use crate::shared::models::{User, UpsertUser};
use crate::shared::schema::users;

pub fn get_user(conn: &mut PgConnection, id: &str) -> QueryResult<Option<User>> {
    users::table.find(id).first(conn).optional()
}

/// Insert-or-update keyed by the external identity id. Role and tenant
/// association are operator-managed and never touched by a login.
pub fn upsert_user(conn: &mut PgConnection, data: &UpsertUser) -> QueryResult<User> {
    diesel::insert_into(users::table)
        .values(data)
        .on_conflict(users::id)
        .do_update()
        .set((
            users::email.eq(excluded(users::email)),
            users::first_name.eq(excluded(users::first_name)),
            users::last_name.eq(excluded(users::last_name)),
            users::profile_image_url.eq(excluded(users::profile_image_url)),
            users::updated_at.eq(diesel::dsl::now),
        ))
        .get_result(conn)
}
