/// `Command` value of a connection waiting for a statement.
pub const IDLE_COMMAND: &str = "Sleep";

/// One row of the database engine's process list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRow {
    pub id: u64,
    pub user: String,
    pub elapsed_seconds: i64,
    pub state: Option<String>,
    pub command: String,
    pub query: Option<String>,
}

impl SessionRow {
    /// Busy and running a statement we can show.
    pub fn is_active(&self) -> bool {
        self.command != IDLE_COMMAND && self.query.as_deref().is_some_and(|q| !q.is_empty())
    }
}

/// Keep the sessions worth reporting, in server order.
pub fn active_sessions(rows: Vec<SessionRow>) -> Vec<SessionRow> {
    let total = rows.len();
    let active: Vec<SessionRow> = rows.into_iter().filter(SessionRow::is_active).collect();
    tracing::debug!(total, active = active.len(), "filtered database sessions");
    active
}
