//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! Each call acquires the underlying store, performs one operation and
//! releases it, so an implementation may hold a persistent connection or open
//! one per call without the use cases noticing.

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::{
    entity::{Message, Participant},
    error::RepositoryError,
    value_object::{MessageLimit, ParticipantId, ParticipantName, Timestamp},
};

/// Participant registry (`participants` collection)
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Insert a participant.
    ///
    /// Fails with `RepositoryError::DuplicateName` when the name is already
    /// registered; the check and the insert are atomic.
    async fn insert(&self, participant: Participant) -> Result<(), RepositoryError>;

    async fn find_by_name(
        &self,
        name: &ParticipantName,
    ) -> Result<Option<Participant>, RepositoryError>;

    /// All participants, in insertion order
    async fn list(&self) -> Result<Vec<Participant>, RepositoryError>;

    /// Refresh `last_status`. Returns the updated record, or `None` if the
    /// name is not registered. The stored value always increases.
    async fn touch(
        &self,
        name: &ParticipantName,
        now: Timestamp,
    ) -> Result<Option<Participant>, RepositoryError>;

    /// Participants whose `last_status` is older than `cutoff`
    async fn find_inactive(&self, cutoff: Timestamp) -> Result<Vec<Participant>, RepositoryError>;

    /// Delete the participant only if it still exists and is still older than
    /// `cutoff`. Returns the removed record, or `None` when nothing matched.
    async fn remove_if_inactive(
        &self,
        id: &ParticipantId,
        cutoff: Timestamp,
    ) -> Result<Option<Participant>, RepositoryError>;
}

/// Append-only message log (`messages` collection)
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn append(&self, message: Message) -> Result<(), RepositoryError>;

    /// Messages visible to `viewer`, oldest first. With a limit, only the
    /// most recent `limit` of them are returned (still oldest first).
    async fn find_visible_to(
        &self,
        viewer: Option<ParticipantName>,
        limit: Option<MessageLimit>,
    ) -> Result<Vec<Message>, RepositoryError>;
}
