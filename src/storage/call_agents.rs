use diesel::prelude::*;
use diesel::upsert::excluded;

use crate::shared::models::{CallAgent, InsertCallAgent};
use crate::shared::schema::call_agents;

pub fn get_call_agents(conn: &mut PgConnection, client_id: &str) -> QueryResult<Vec<CallAgent>> {
    call_agents::table
        .filter(call_agents::client_id.eq(client_id))
        .order(call_agents::conversion_rate.desc())
        .load(conn)
}

/// Agent identity is the (client_id, name) pair; a repeat upsert
/// refreshes the totals in place instead of duplicating the row.
pub fn upsert_call_agent(conn: &mut PgConnection, data: &InsertCallAgent) -> QueryResult<CallAgent> {
    diesel::insert_into(call_agents::table)
        .values(data)
        .on_conflict((call_agents::client_id, call_agents::name))
        .do_update()
        .set((
            call_agents::email.eq(excluded(call_agents::email)),
            call_agents::avatar.eq(excluded(call_agents::avatar)),
            call_agents::total_calls.eq(excluded(call_agents::total_calls)),
            call_agents::qualified_calls.eq(excluded(call_agents::qualified_calls)),
            call_agents::conversion_rate.eq(excluded(call_agents::conversion_rate)),
            call_agents::rating.eq(excluded(call_agents::rating)),
            call_agents::updated_at.eq(diesel::dsl::now),
        ))
        .get_result(conn)
}
