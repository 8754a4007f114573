use crate::config::{DbCredentials, MysqlConfig};
use crate::error::InspectError;
use crate::model::SessionRow;
use mysql::prelude::{FromValue, Queryable};
use mysql::{Conn, OptsBuilder, Row};

const PROCESSLIST_QUERY: &str = "SHOW FULL PROCESSLIST";

/// Something that can list the database engine's current sessions.
pub trait ActivitySource {
    fn sessions(&mut self) -> Result<Vec<SessionRow>, InspectError>;
}

/// Live MySQL/MariaDB connection.
pub struct MysqlSource {
    conn: Conn,
}

impl MysqlSource {
    pub fn connect(creds: &DbCredentials, cfg: &MysqlConfig) -> Result<Self, InspectError> {
        let opts = OptsBuilder::new()
            .ip_or_hostname(Some(cfg.host.as_str()))
            .tcp_port(cfg.port)
            .user(Some(creds.user.as_str()))
            .pass(Some(creds.password.as_str()))
            .db_name(Some(cfg.database.as_str()));

        let conn = Conn::new(opts).map_err(|source| InspectError::Connect {
            host: cfg.host.clone(),
            port: cfg.port,
            source,
        })?;
        tracing::debug!(host = %cfg.host, port = cfg.port, "connected to database");

        Ok(Self { conn })
    }
}

impl ActivitySource for MysqlSource {
    fn sessions(&mut self) -> Result<Vec<SessionRow>, InspectError> {
        let rows: Vec<Row> = self
            .conn
            .query(PROCESSLIST_QUERY)
            .map_err(|source| InspectError::Query {
                query: PROCESSLIST_QUERY,
                source,
            })?;
        Ok(rows.iter().map(session_from_row).collect())
    }
}

/// Map one `SHOW FULL PROCESSLIST` row by column name.
///
/// NULL or unconvertible numbers fall back to zero. Text cells that are not
/// valid UTF-8 are decoded lossily, so a busy session is never dropped for them.
fn session_from_row(row: &Row) -> SessionRow {
    SessionRow {
        id: number(row, "Id"),
        user: text(row, "User").unwrap_or_default(),
        elapsed_seconds: number(row, "Time"),
        state: text(row, "State"),
        command: text(row, "Command").unwrap_or_default(),
        query: text(row, "Info"),
    }
}

fn number<T: FromValue + Default>(row: &Row, name: &'static str) -> T {
    match row.get_opt::<T, &str>(name) {
        Some(Ok(value)) => value,
        Some(Err(err)) => {
            tracing::trace!(column = name, error = ?err, "unconvertible cell, using 0");
            T::default()
        }
        None => {
            tracing::trace!(column = name, "missing column, using 0");
            T::default()
        }
    }
}

fn text(row: &Row, name: &str) -> Option<String> {
    row.get_opt::<Option<Vec<u8>>, &str>(name)
        .and_then(Result::ok)
        .flatten()
        .map(|bytes| decode_text(&bytes))
}

fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn utf8_text_is_kept_as_is() {
        assert_eq!(decode_text("SELECT 'café'".as_bytes()), "SELECT 'café'");
    }

    #[test]
    fn non_utf8_query_keeps_session_active() {
        let query = decode_text(b"SELECT * FROM t WHERE name = '\xff\xfe'");
        assert_eq!(query, "SELECT * FROM t WHERE name = '\u{FFFD}\u{FFFD}'");

        let session = SessionRow {
            id: 9,
            user: "wp".to_string(),
            elapsed_seconds: 30,
            state: Some("Sending data".to_string()),
            command: "Query".to_string(),
            query: Some(query),
        };
        assert!(session.is_active());
    }
}
