use diesel::prelude::*;

use crate::shared::models::{File, InsertFile};
use crate::shared::schema::files;

pub fn get_files(conn: &mut PgConnection, client_id: &str) -> QueryResult<Vec<File>> {
    files::table
        .filter(files::client_id.eq(client_id))
        .order(files::created_at.desc())
        .load(conn)
}

pub fn insert_file(conn: &mut PgConnection, data: &InsertFile) -> QueryResult<File> {
    diesel::insert_into(files::table)
        .values(data)
        .get_result(conn)
}

pub fn get_file(conn: &mut PgConnection, id: i32) -> QueryResult<Option<File>> {
    files::table.find(id).first(conn).optional()
}

pub fn delete_file(conn: &mut PgConnection, id: i32) -> QueryResult<usize> {
    diesel::delete(files::table.find(id)).execute(conn)
}
