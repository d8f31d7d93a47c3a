//! Persistence — the append-only document store for resume payloads and
//! the relational candidates table. Both live in Postgres; neither store
//! ever updates a row in place.

pub mod candidates;
pub mod documents;
