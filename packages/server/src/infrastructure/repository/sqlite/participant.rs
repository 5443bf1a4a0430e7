//! SQLite participant registry.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{OptionalExtension, Row, params};
use uuid::Uuid;

use super::database::{SqliteDatabase, corrupted, unavailable};
use crate::domain::{
    Participant, ParticipantId, ParticipantName, ParticipantRepository, RepositoryError, Timestamp,
};

/// SQLite participant repository
#[derive(Clone)]
pub struct SqliteParticipantRepository {
    db: Arc<SqliteDatabase>,
}

impl SqliteParticipantRepository {
    pub fn new(db: Arc<SqliteDatabase>) -> Self {
        Self { db }
    }
}

/// Raw `participants` row
struct ParticipantRow {
    id: String,
    name: String,
    last_status: i64,
}

impl ParticipantRow {
    const COLUMNS: &'static str = "id, name, last_status";

    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            last_status: row.get(2)?,
        })
    }

    fn into_participant(self) -> Result<Participant, RepositoryError> {
        let id = Uuid::parse_str(&self.id).map_err(|e| corrupted("participant id", e))?;
        let name = ParticipantName::new(self.name).map_err(|e| corrupted("participant name", e))?;
        Ok(Participant {
            id: ParticipantId::from_uuid(id),
            name,
            last_status: Timestamp::new(self.last_status),
        })
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

#[async_trait]
impl ParticipantRepository for SqliteParticipantRepository {
    async fn insert(&self, participant: Participant) -> Result<(), RepositoryError> {
        self.db.with_conn(|conn| {
            let result = conn.execute(
                "INSERT INTO participants (id, name, last_status) VALUES (?1, ?2, ?3)",
                params![
                    participant.id.as_uuid().to_string(),
                    participant.name.as_str(),
                    participant.last_status.value(),
                ],
            );
            match result {
                Ok(_) => Ok(()),
                Err(e) if is_unique_violation(&e) => Err(RepositoryError::DuplicateName(
                    participant.name.into_string(),
                )),
                Err(e) => Err(unavailable(e)),
            }
        })
    }

    async fn find_by_name(
        &self,
        name: &ParticipantName,
    ) -> Result<Option<Participant>, RepositoryError> {
        self.db.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!(
                        "SELECT {} FROM participants WHERE name = ?1",
                        ParticipantRow::COLUMNS
                    ),
                    params![name.as_str()],
                    ParticipantRow::read,
                )
                .optional()
                .map_err(unavailable)?;
            row.map(ParticipantRow::into_participant).transpose()
        })
    }

    async fn list(&self) -> Result<Vec<Participant>, RepositoryError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {} FROM participants ORDER BY rowid",
                    ParticipantRow::COLUMNS
                ))
                .map_err(unavailable)?;
            let rows = stmt
                .query_map([], ParticipantRow::read)
                .map_err(unavailable)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(unavailable)?;
            rows.into_iter().map(ParticipantRow::into_participant).collect()
        })
    }

    async fn touch(
        &self,
        name: &ParticipantName,
        now: Timestamp,
    ) -> Result<Option<Participant>, RepositoryError> {
        self.db.with_conn(|conn| {
            // Two keep-alives within the same millisecond still move the value.
            let updated = conn
                .execute(
                    "UPDATE participants SET last_status = MAX(?2, last_status + 1) WHERE name = ?1",
                    params![name.as_str(), now.value()],
                )
                .map_err(unavailable)?;
            if updated == 0 {
                return Ok(None);
            }
            let row = conn
                .query_row(
                    &format!(
                        "SELECT {} FROM participants WHERE name = ?1",
                        ParticipantRow::COLUMNS
                    ),
                    params![name.as_str()],
                    ParticipantRow::read,
                )
                .optional()
                .map_err(unavailable)?;
            row.map(ParticipantRow::into_participant).transpose()
        })
    }

    async fn find_inactive(&self, cutoff: Timestamp) -> Result<Vec<Participant>, RepositoryError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {} FROM participants WHERE last_status < ?1 ORDER BY rowid",
                    ParticipantRow::COLUMNS
                ))
                .map_err(unavailable)?;
            let rows = stmt
                .query_map(params![cutoff.value()], ParticipantRow::read)
                .map_err(unavailable)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(unavailable)?;
            rows.into_iter().map(ParticipantRow::into_participant).collect()
        })
    }

    async fn remove_if_inactive(
        &self,
        id: &ParticipantId,
        cutoff: Timestamp,
    ) -> Result<Option<Participant>, RepositoryError> {
        self.db.with_conn(|conn| {
            let tx = conn.transaction().map_err(unavailable)?;
            let id = id.as_uuid().to_string();
            let row = tx
                .query_row(
                    &format!(
                        "SELECT {} FROM participants WHERE id = ?1 AND last_status < ?2",
                        ParticipantRow::COLUMNS
                    ),
                    params![id, cutoff.value()],
                    ParticipantRow::read,
                )
                .optional()
                .map_err(unavailable)?;
            if row.is_some() {
                tx.execute("DELETE FROM participants WHERE id = ?1", params![id])
                    .map_err(unavailable)?;
            }
            tx.commit().map_err(unavailable)?;
            row.map(ParticipantRow::into_participant).transpose()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - UNIQUE インデックスで名前の一意性が保証されること
    // - touch / 条件付き削除がインメモリ実装と同じ規則で動くこと
    // - ファイルに保存した参加者が再オープン後も残ること
    // ========================================

    fn name(value: &str) -> ParticipantName {
        ParticipantName::new(value.to_string()).unwrap()
    }

    fn repository() -> SqliteParticipantRepository {
        SqliteParticipantRepository::new(Arc::new(SqliteDatabase::open_in_memory().unwrap()))
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_name() {
        // テスト項目: 同じ名前の参加者は UNIQUE 制約により DuplicateName で拒否される
        // given (前提条件):
        let repo = repository();
        repo.insert(Participant::new(name("alice"), Timestamp::new(1)))
            .await
            .unwrap();

        // when (操作):
        let result = repo
            .insert(Participant::new(name("alice"), Timestamp::new(2)))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RepositoryError::DuplicateName("alice".to_string()))
        );
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_names_are_case_sensitive() {
        // テスト項目: 大文字小文字が異なる名前は別の参加者として登録できる
        // given (前提条件):
        let repo = repository();
        repo.insert(Participant::new(name("alice"), Timestamp::new(1)))
            .await
            .unwrap();

        // when (操作):
        let result = repo
            .insert(Participant::new(name("Alice"), Timestamp::new(1)))
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(()));
        let found = repo.find_by_name(&name("Alice")).await.unwrap();
        assert_eq!(found.map(|p| p.name), Some(name("Alice")));
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        // テスト項目: 一覧は挿入順で返され、レコードは挿入した値と一致する
        // given (前提条件):
        let repo = repository();
        let mut inserted = Vec::new();
        for n in ["charlie", "alice", "bob"] {
            let participant = Participant::new(name(n), Timestamp::new(7));
            inserted.push(participant.clone());
            repo.insert(participant).await.unwrap();
        }

        // when (操作):
        let listed = repo.list().await.unwrap();

        // then (期待する結果):
        assert_eq!(listed, inserted);
    }

    #[tokio::test]
    async fn test_touch_strictly_increases_last_status() {
        // テスト項目: 同じ時刻で touch しても last_status は増加し、未登録なら None
        // given (前提条件):
        let repo = repository();
        repo.insert(Participant::new(name("alice"), Timestamp::new(1_000)))
            .await
            .unwrap();

        // when (操作):
        let same_millis = repo
            .touch(&name("alice"), Timestamp::new(1_000))
            .await
            .unwrap()
            .unwrap();
        let later = repo
            .touch(&name("alice"), Timestamp::new(5_000))
            .await
            .unwrap()
            .unwrap();
        let unknown = repo.touch(&name("ghost"), Timestamp::new(5_000)).await;

        // then (期待する結果):
        assert_eq!(same_millis.last_status, Timestamp::new(1_001));
        assert_eq!(later.last_status, Timestamp::new(5_000));
        assert_eq!(unknown, Ok(None));
    }

    #[tokio::test]
    async fn test_find_inactive_uses_strict_cutoff() {
        // テスト項目: cutoff より古い参加者のみ抽出される
        // given (前提条件):
        let repo = repository();
        for (n, last_status) in [("old", 100), ("edge", 200), ("fresh", 300)] {
            repo.insert(Participant::new(name(n), Timestamp::new(last_status)))
                .await
                .unwrap();
        }

        // when (操作):
        let inactive = repo.find_inactive(Timestamp::new(200)).await.unwrap();

        // then (期待する結果):
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].name, name("old"));
    }

    #[tokio::test]
    async fn test_remove_if_inactive_respects_refresh_and_identity() {
        // テスト項目: touch 済みの参加者と同名で再登録された別レコードは削除されず、古いままの参加者は削除される
        // given (前提条件):
        let repo = repository();
        let refreshed = Participant::new(name("alice"), Timestamp::new(100));
        let refreshed_id = refreshed.id;
        repo.insert(refreshed).await.unwrap();
        repo.touch(&name("alice"), Timestamp::new(600)).await.unwrap();

        let stale = Participant::new(name("bob"), Timestamp::new(100));
        let stale_id = stale.id;
        repo.insert(stale.clone()).await.unwrap();

        // when (操作):
        let kept = repo.remove_if_inactive(&refreshed_id, Timestamp::new(500)).await;
        let removed = repo.remove_if_inactive(&stale_id, Timestamp::new(500)).await;
        repo.insert(Participant::new(name("bob"), Timestamp::new(100)))
            .await
            .unwrap();
        let reregistered = repo.remove_if_inactive(&stale_id, Timestamp::new(500)).await;

        // then (期待する結果):
        assert_eq!(kept, Ok(None));
        assert_eq!(removed, Ok(Some(stale)));
        assert_eq!(reregistered, Ok(None));
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_participants_survive_reopen() {
        // テスト項目: ファイルに保存した参加者はデータベースを開き直しても残る
        // given (前提条件):
        let path = std::env::temp_dir().join(format!("batepapo-{}.db", Uuid::new_v4()));
        let alice = Participant::new(name("alice"), Timestamp::new(42));
        {
            let repo =
                SqliteParticipantRepository::new(Arc::new(SqliteDatabase::open(&path).unwrap()));
            repo.insert(alice.clone()).await.unwrap();
        }

        // when (操作):
        let repo = SqliteParticipantRepository::new(Arc::new(SqliteDatabase::open(&path).unwrap()));
        let listed = repo.list().await.unwrap();
        let duplicate = repo
            .insert(Participant::new(name("alice"), Timestamp::new(43)))
            .await;

        // then (期待する結果):
        assert_eq!(listed, vec![alice]);
        assert_eq!(
            duplicate,
            Err(RepositoryError::DuplicateName("alice".to_string()))
        );

        drop(repo);
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
        }
    }
}
