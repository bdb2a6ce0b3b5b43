//! Slash-command registry.
//!
//! Commands always start from the idle state. Most either finish with a
//! single reply or, when invoked without an argument, open the matching
//! multi-step flow.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::application::{replies, PackRepository, Repositories};
use crate::domain::conversation::{ConversationState, InboundMessage};
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::pack::{Pack, PackError};

use super::transition::{SplitInfrastructure, Transition};

/// Every command the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    NewPack,
    MyPacks,
    Subscribe,
    Unsubscribe,
    Subscriptions,
    NewGif,
    DeleteGif,
    AddContributor,
    RemoveContributor,
    DeletePack,
    Version,
    Cancel,
}

static REGISTRY: Lazy<HashMap<&'static str, Command>> = Lazy::new(|| {
    Command::ALL.iter().map(|c| (c.name(), *c)).collect()
});

impl Command {
    pub const ALL: [Command; 12] = [
        Command::NewPack,
        Command::MyPacks,
        Command::Subscribe,
        Command::Unsubscribe,
        Command::Subscriptions,
        Command::NewGif,
        Command::DeleteGif,
        Command::AddContributor,
        Command::RemoveContributor,
        Command::DeletePack,
        Command::Version,
        Command::Cancel,
    ];

    /// Name as typed after the slash.
    pub fn name(&self) -> &'static str {
        match self {
            Command::NewPack => "newpack",
            Command::MyPacks => "mypacks",
            Command::Subscribe => "subscribe",
            Command::Unsubscribe => "unsubscribe",
            Command::Subscriptions => "subscriptions",
            Command::NewGif => "newgif",
            Command::DeleteGif => "deletegif",
            Command::AddContributor => "addcontributor",
            Command::RemoveContributor => "removecontributor",
            Command::DeletePack => "deletepack",
            Command::Version => "version",
            Command::Cancel => "cancel",
        }
    }

    /// Looks a command up by name. Matching ignores case.
    pub fn lookup(name: &str) -> Option<Command> {
        REGISTRY.get(name.to_ascii_lowercase().as_str()).copied()
    }

    pub async fn run(
        self,
        repos: &Repositories,
        message: &InboundMessage,
    ) -> Result<Transition, DomainError> {
        let arg = message.command_argument();
        let user = message.user_id;

        match self {
            Command::NewPack => new_pack(repos, user, arg).await,
            Command::MyPacks => my_packs(repos, user).await,
            Command::Subscribe => subscribe(repos, user, arg).await,
            Command::Unsubscribe => unsubscribe(repos, user, arg).await,
            Command::Subscriptions => {
                let subs = repos.subscriptions.list_for_user(user).await?;
                Ok(Transition::notice(replies::my_subscriptions(&subs)))
            }
            Command::NewGif => new_gif(repos, user, arg).await,
            Command::DeleteGif => delete_gif(repos, user, arg).await,
            Command::AddContributor => change_contributor(repos, user, arg, true).await,
            Command::RemoveContributor => change_contributor(repos, user, arg, false).await,
            Command::DeletePack => delete_pack(repos, user, arg).await,
            Command::Version => Ok(Transition::notice(replies::version(&repos.version))),
            Command::Cancel => Ok(Transition::notice(replies::CANCELLED)),
        }
    }
}

async fn new_pack(repos: &Repositories, user: UserId, arg: &str) -> Result<Transition, DomainError> {
    if arg.is_empty() {
        return Ok(Transition::advance(
            ConversationState::NewPackWaitName,
            replies::ASK_NEW_PACK_NAME,
        ));
    }

    Ok(match repos.packs.create(arg, user).await.split_infrastructure()? {
        Ok(true) => Transition::done(replies::PACK_CREATED),
        Ok(false) => Transition::done(replies::PACK_NAME_TAKEN),
        Err(_) => Transition::done(replies::INVALID_NAME),
    })
}

async fn my_packs(repos: &Repositories, user: UserId) -> Result<Transition, DomainError> {
    let created = repos.packs.list_created_by(user).await?;
    let contributed = repos.packs.list_contributed_to(user).await?;
    Ok(Transition::notice(replies::my_packs(&created, &contributed)))
}

async fn subscribe(repos: &Repositories, user: UserId, arg: &str) -> Result<Transition, DomainError> {
    if arg.is_empty() {
        return Ok(Transition::advance(
            ConversationState::SubscribeWaitPackName,
            replies::ASK_PACK_TO_SUBSCRIBE,
        ));
    }

    Ok(
        match repos.subscriptions.subscribe(arg, user).await.split_infrastructure()? {
            Ok(true) => Transition::done(replies::SUBSCRIBED),
            Ok(false) => Transition::done(replies::ALREADY_SUBSCRIBED),
            Err(PackError::InvalidName(_)) => Transition::done(replies::INVALID_NAME),
            Err(_) => Transition::done(replies::NO_SUCH_PACK),
        },
    )
}

async fn unsubscribe(
    repos: &Repositories,
    user: UserId,
    arg: &str,
) -> Result<Transition, DomainError> {
    if arg.is_empty() {
        return Ok(Transition::advance(
            ConversationState::UnsubscribeWaitPackName,
            replies::ASK_PACK_TO_UNSUBSCRIBE,
        ));
    }

    Ok(
        match repos.subscriptions.unsubscribe(arg, user).await.split_infrastructure()? {
            Ok(true) => Transition::done(replies::UNSUBSCRIBED),
            Ok(false) => Transition::done(replies::NEVER_SUBSCRIBED),
            Err(PackError::InvalidName(_)) => Transition::done(replies::INVALID_NAME),
            Err(PackError::Deleted(_)) => Transition::done(replies::PACK_DELETED),
            Err(_) => Transition::done(replies::NO_SUCH_PACK),
        },
    )
}

async fn new_gif(repos: &Repositories, user: UserId, arg: &str) -> Result<Transition, DomainError> {
    if arg.is_empty() {
        return Ok(Transition::advance(
            ConversationState::NewGifWaitPackName,
            replies::ASK_PACK_TO_ADD_TO,
        ));
    }

    Ok(match editable(repos, user, arg).await? {
        Ok(pack) => Transition::advance(
            ConversationState::NewGifWaitClip {
                pack: pack.name().clone(),
            },
            replies::ASK_CLIP_TO_ADD,
        ),
        Err(PackError::NotAllowed) => Transition::done(replies::NOT_ALLOWED_TO_ADD),
        Err(e) => Transition::done(lookup_failure(&e)),
    })
}

async fn delete_gif(
    repos: &Repositories,
    user: UserId,
    arg: &str,
) -> Result<Transition, DomainError> {
    if arg.is_empty() {
        return Ok(Transition::advance(
            ConversationState::DeleteGifWaitPackName,
            replies::ASK_PACK_TO_DELETE_FROM,
        ));
    }

    Ok(match editable(repos, user, arg).await? {
        Ok(pack) => Transition::advance(
            ConversationState::DeleteGifWaitClip {
                pack: pack.name().clone(),
            },
            replies::ASK_CLIP_TO_DELETE,
        ),
        Err(PackError::NotAllowed) => Transition::done(replies::NOT_ALLOWED_TO_DELETE),
        Err(e) => Transition::done(lookup_failure(&e)),
    })
}

async fn change_contributor(
    repos: &Repositories,
    user: UserId,
    arg: &str,
    add: bool,
) -> Result<Transition, DomainError> {
    let usage = if add {
        replies::ADD_CONTRIBUTOR_USAGE
    } else {
        replies::REMOVE_CONTRIBUTOR_USAGE
    };
    let Some((pack, contributor)) = pack_and_user(arg) else {
        return Ok(Transition::done(usage));
    };

    let outcome = if add {
        repos.packs.add_contributor(pack, user, contributor).await
    } else {
        repos.packs.remove_contributor(pack, user, contributor).await
    };

    Ok(match (outcome.split_infrastructure()?, add) {
        (Ok(true), true) => Transition::done(replies::CONTRIBUTOR_ADDED),
        (Ok(false), true) => Transition::done(replies::ALREADY_CONTRIBUTOR),
        (Ok(true), false) => Transition::done(replies::CONTRIBUTOR_REMOVED),
        (Ok(false), false) => Transition::done(replies::NOT_A_CONTRIBUTOR),
        (Err(PackError::NotAllowed), _) => Transition::done(replies::ONLY_CREATOR),
        (Err(e), _) => Transition::done(lookup_failure(&e)),
    })
}

async fn delete_pack(
    repos: &Repositories,
    user: UserId,
    arg: &str,
) -> Result<Transition, DomainError> {
    if arg.is_empty() {
        return Ok(Transition::done(replies::DELETE_PACK_USAGE));
    }

    Ok(match repos.packs.soft_delete(arg, user).await.split_infrastructure()? {
        Ok(()) => Transition::done(replies::PACK_REMOVED),
        Err(PackError::NotAllowed) => Transition::done(replies::ONLY_CREATOR),
        Err(e) => Transition::done(lookup_failure(&e)),
    })
}

/// Resolves a live pack the user may edit.
async fn editable(
    repos: &Repositories,
    user: UserId,
    name: &str,
) -> Result<Result<Pack, PackError>, DomainError> {
    let pack = repos.packs.get(name).await.split_infrastructure()?;
    Ok(pack.and_then(|pack| {
        if PackRepository::has_edit_permission(&pack, user) {
            Ok(pack)
        } else {
            Err(PackError::NotAllowed)
        }
    }))
}

fn lookup_failure(err: &PackError) -> &'static str {
    match err {
        PackError::InvalidName(_) => replies::INVALID_NAME,
        PackError::Deleted(_) => replies::PACK_DELETED,
        _ => replies::NO_SUCH_PACK,
    }
}

/// Parses `<pack name> <user id>`.
fn pack_and_user(arg: &str) -> Option<(&str, UserId)> {
    let mut parts = arg.split_whitespace();
    let pack = parts.next()?;
    let user = parts.next()?.parse().ok()?;
    match parts.next() {
        Some(_) => None,
        None => Some((pack, user)),
    }
}
