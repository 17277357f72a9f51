use diesel::prelude::*;

use crate::shared::models::{Comment, InsertComment};
use crate::shared::schema::comments;

pub fn get_comments(conn: &mut PgConnection, client_id: &str) -> QueryResult<Vec<Comment>> {
    comments::table
        .filter(comments::client_id.eq(client_id))
        .order(comments::created_at.desc())
        .load(conn)
}

pub fn insert_comment(conn: &mut PgConnection, data: &InsertComment) -> QueryResult<Comment> {
    diesel::insert_into(comments::table)
        .values(data)
        .get_result(conn)
}
