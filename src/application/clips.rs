//! ClipIndex - permission-checked clip writes and keyword search.

use std::sync::Arc;

use tracing::debug;

use crate::domain::clip::{dedupe_by_clip_id, Clip, QueryBuilder, Selector};
use crate::domain::foundation::{ClipId, DomainError, UserId};
use crate::domain::pack::{Pack, PackError, PackName, SharedWithContributors};
use crate::ports::{ClipStore, PackStore};

use super::packs::resolve_pack;
use super::SubscriptionRepository;

#[derive(Clone)]
pub struct ClipIndex {
    packs: Arc<dyn PackStore>,
    subscriptions: SubscriptionRepository,
    clips: Arc<dyn ClipStore>,
}

impl ClipIndex {
    pub fn new(
        packs: Arc<dyn PackStore>,
        subscriptions: SubscriptionRepository,
        clips: Arc<dyn ClipStore>,
    ) -> Self {
        Self {
            packs,
            subscriptions,
            clips,
        }
    }

    /// Adds a clip. Returns `false` if the pack already holds that clip id.
    pub async fn add(
        &self,
        pack: &str,
        requester: UserId,
        clip_id: ClipId,
        keywords: &str,
    ) -> Result<bool, PackError> {
        let pack = self.editable_pack(pack, requester).await?;
        let clip = Clip::new(pack.name().clone(), clip_id, keywords);
        let added = self.clips.put_if_absent(&clip).await?.inserted();
        debug!(clip = %clip.key(), added, "Clip add");
        Ok(added)
    }

    /// Replaces a clip's keywords. Returns `false` if the clip is absent.
    pub async fn edit(
        &self,
        pack: &str,
        requester: UserId,
        clip_id: ClipId,
        keywords: &str,
    ) -> Result<bool, PackError> {
        let pack = self.editable_pack(pack, requester).await?;
        let clip = Clip::new(pack.name().clone(), clip_id, keywords);
        Ok(self.clips.replace(&clip).await?)
    }

    /// Removes a clip. Returns `false` if the clip is absent.
    pub async fn delete(
        &self,
        pack: &str,
        requester: UserId,
        clip_id: &ClipId,
    ) -> Result<bool, PackError> {
        let pack = self.editable_pack(pack, requester).await?;
        Ok(self.clips.delete(pack.name(), clip_id).await?)
    }

    /// True if the pack already holds the clip id.
    pub async fn contains(&self, pack: &PackName, clip_id: &ClipId) -> Result<bool, DomainError> {
        Ok(self.clips.get(pack, clip_id).await?.is_some())
    }

    /// Runs a search query on behalf of a user.
    ///
    /// Unresolvable packs yield no results. Only infrastructure failures
    /// are errors.
    pub async fn search(&self, user_id: UserId, raw_query: &str) -> Result<Vec<Clip>, DomainError> {
        let query = QueryBuilder::parse(raw_query);
        if query.matches_nothing() {
            debug!(query = %raw_query, "Search keywords hold no searchable token");
            return Ok(Vec::new());
        }

        let packs: Vec<PackName> = match &query.selector {
            Selector::Subscribed => match self.subscriptions.list_for_user(user_id).await {
                Ok(subs) => subs.into_iter().map(|s| s.pack).collect(),
                Err(e) => {
                    e.into_infrastructure()?;
                    Vec::new()
                }
            },
            Selector::Pack(raw) => match resolve_pack(self.packs.as_ref(), raw).await {
                Ok(pack) => vec![pack.name().clone()],
                Err(e) => {
                    let e = e.into_infrastructure()?;
                    debug!(pack = %raw, reason = %e, "Search pack does not resolve");
                    Vec::new()
                }
            },
        };

        let mut found = Vec::new();
        for pack in &packs {
            let index_query = QueryBuilder::for_pack(pack, &query);
            debug!(query = %index_query, "Searching clip index");

            let mut cursor = None;
            loop {
                let page = self.clips.search(&index_query, cursor).await?;
                found.extend(page.clips);
                match page.next_cursor {
                    Some(next) => cursor = Some(next),
                    None => break,
                }
            }
        }

        Ok(dedupe_by_clip_id(found))
    }

    async fn editable_pack(&self, name: &str, requester: UserId) -> Result<Pack, PackError> {
        let pack = resolve_pack(self.packs.as_ref(), name).await?;
        pack.check_edit_permission(requester)?;
        Ok(pack)
    }
}
