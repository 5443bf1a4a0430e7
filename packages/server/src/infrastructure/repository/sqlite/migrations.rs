use rusqlite::Connection;

pub(super) fn run(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS participants (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            last_status INTEGER NOT NULL
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_participants_name
            ON participants(name);

        CREATE INDEX IF NOT EXISTS idx_participants_last_status
            ON participants(last_status);

        CREATE TABLE IF NOT EXISTS messages (
            seq        INTEGER PRIMARY KEY AUTOINCREMENT,
            id         TEXT NOT NULL UNIQUE,
            sender     TEXT NOT NULL,
            recipient  TEXT NOT NULL,
            text       TEXT NOT NULL,
            kind       TEXT NOT NULL,
            time       TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_messages_recipient ON messages(recipient);
        CREATE INDEX IF NOT EXISTS idx_messages_sender ON messages(sender);
        ",
    )
}
