use diesel::prelude::*;

use crate::shared::models::{Client, InsertClient, UpdateClient};
use crate::shared::schema::clients;

pub fn get_client(conn: &mut PgConnection, id: &str) -> QueryResult<Option<Client>> {
    clients::table.find(id).first(conn).optional()
}

pub fn get_client_by_subdomain(
    conn: &mut PgConnection,
    subdomain: &str,
) -> QueryResult<Option<Client>> {
    clients::table
        .filter(clients::subdomain.eq(subdomain))
        .first(conn)
        .optional()
}

pub fn create_client(conn: &mut PgConnection, data: &InsertClient) -> QueryResult<Client> {
    diesel::insert_into(clients::table)
        .values(data)
        .get_result(conn)
}

pub fn update_client(
    conn: &mut PgConnection,
    id: &str,
    changes: &UpdateClient,
) -> QueryResult<Client> {
    diesel::update(clients::table.find(id))
        .set((changes, clients::updated_at.eq(diesel::dsl::now)))
        .get_result(conn)
}
