//! Conversation transducer: one step function per waiting state.
//!
//! Each step maps `(state, inbound message)` to a [`Transition`]. Domain
//! failures become replies; infrastructure failures propagate so the stored
//! state stays as it was.

use crate::application::{replies, PackRepository, Repositories};
use crate::domain::conversation::{ConversationState, InboundMessage, Input};
use crate::domain::foundation::{ClipId, DomainError, StateMachine};
use crate::domain::pack::{PackError, PackName};

use super::transition::{SplitInfrastructure, Transition};

/// Advances the conversation. Returns `None` when the state expects nothing.
pub async fn transduce(
    repos: &Repositories,
    state: &ConversationState,
    message: &InboundMessage,
) -> Result<Option<Transition>, DomainError> {
    use ConversationState as S;

    let transition = match state {
        S::None => return Ok(None),
        S::NewPackWaitName => new_pack_wait_name(repos, state, message).await?,
        S::NewGifWaitPackName => new_gif_wait_pack_name(repos, state, message).await?,
        S::NewGifWaitClip { pack } => new_gif_wait_clip(repos, state, message, pack).await?,
        S::NewGifWaitKeywords { pack, clip_id } => {
            new_gif_wait_keywords(repos, state, message, pack, clip_id).await?
        }
        S::SubscribeWaitPackName => subscribe_wait_pack_name(repos, state, message).await?,
        S::UnsubscribeWaitPackName => unsubscribe_wait_pack_name(repos, state, message).await?,
        S::DeleteGifWaitPackName => delete_gif_wait_pack_name(repos, state, message).await?,
        S::DeleteGifWaitClip { pack } => delete_gif_wait_clip(repos, state, message, pack).await?,
    };

    state.tag().transition_to(transition.next.tag())?;
    Ok(Some(transition))
}

pub async fn new_pack_wait_name(
    repos: &Repositories,
    state: &ConversationState,
    message: &InboundMessage,
) -> Result<Transition, DomainError> {
    let Input::Text(name) = message.input() else {
        return Ok(Transition::stay(state, replies::WAITING_NEW_PACK_NAME));
    };

    Ok(
        match repos.packs.create(name, message.user_id).await.split_infrastructure()? {
            Ok(true) => Transition::done(replies::PACK_CREATED),
            Ok(false) => Transition::stay(state, replies::PACK_NAME_TAKEN),
            Err(_) => Transition::stay(state, replies::INVALID_NAME),
        },
    )
}

pub async fn new_gif_wait_pack_name(
    repos: &Repositories,
    state: &ConversationState,
    message: &InboundMessage,
) -> Result<Transition, DomainError> {
    let Input::Text(name) = message.input() else {
        return Ok(Transition::stay(state, replies::WAITING_PACK_TO_ADD_TO));
    };

    Ok(match repos.packs.get(name).await.split_infrastructure()? {
        Ok(pack) if PackRepository::has_edit_permission(&pack, message.user_id) => {
            Transition::advance(
                ConversationState::NewGifWaitClip {
                    pack: pack.name().clone(),
                },
                replies::ASK_CLIP_TO_ADD,
            )
        }
        Ok(_) => Transition::done(replies::NOT_ALLOWED_TO_ADD),
        Err(PackError::InvalidName(_)) => Transition::stay(state, replies::INVALID_NAME_RETRY),
        Err(PackError::Deleted(_)) => Transition::stay(state, replies::PACK_DELETED),
        Err(_) => Transition::stay(state, replies::PACK_DOES_NOT_EXIST),
    })
}

pub async fn new_gif_wait_clip(
    repos: &Repositories,
    state: &ConversationState,
    message: &InboundMessage,
    pack: &PackName,
) -> Result<Transition, DomainError> {
    let Input::Clip(clip_id) = message.input() else {
        return Ok(Transition::stay(state, replies::WAITING_CLIP_TO_ADD));
    };

    // Rights may have changed since the pack was chosen.
    match repos.packs.get(pack.as_str()).await.split_infrastructure()? {
        Ok(current) if PackRepository::has_edit_permission(&current, message.user_id) => {}
        Ok(_) => return Ok(Transition::done(replies::NOT_ALLOWED_TO_ADD)),
        Err(_) => return Ok(Transition::done(replies::PACK_GONE)),
    }

    if repos.clips.contains(pack, clip_id).await? {
        return Ok(Transition::done(replies::CLIP_ALREADY_IN_PACK));
    }

    Ok(Transition::advance(
        ConversationState::NewGifWaitKeywords {
            pack: pack.clone(),
            clip_id: clip_id.clone(),
        },
        replies::ASK_KEYWORDS,
    ))
}

pub async fn new_gif_wait_keywords(
    repos: &Repositories,
    state: &ConversationState,
    message: &InboundMessage,
    pack: &PackName,
    clip_id: &ClipId,
) -> Result<Transition, DomainError> {
    let Input::Text(keywords) = message.input() else {
        return Ok(Transition::stay(state, replies::WAITING_KEYWORDS));
    };

    let added = repos
        .clips
        .add(pack.as_str(), message.user_id, clip_id.clone(), keywords)
        .await
        .split_infrastructure()?;

    Ok(match added {
        Ok(true) => Transition::done(replies::CLIP_ADDED),
        Ok(false) => Transition::done(replies::CLIP_ALREADY_IN_PACK),
        Err(PackError::NotAllowed) => Transition::done(replies::NOT_ALLOWED_TO_ADD),
        Err(_) => Transition::done(replies::PACK_GONE),
    })
}

pub async fn subscribe_wait_pack_name(
    repos: &Repositories,
    state: &ConversationState,
    message: &InboundMessage,
) -> Result<Transition, DomainError> {
    let Input::Text(name) = message.input() else {
        return Ok(Transition::stay(state, replies::WAITING_PACK_TO_SUBSCRIBE));
    };

    Ok(
        match repos
            .subscriptions
            .subscribe(name, message.user_id)
            .await
            .split_infrastructure()?
        {
            Ok(true) => Transition::done(replies::SUBSCRIBED),
            Ok(false) => Transition::done(replies::ALREADY_SUBSCRIBED),
            Err(PackError::InvalidName(_)) => Transition::stay(state, replies::INVALID_NAME),
            Err(_) => Transition::stay(state, replies::NO_SUCH_PACK),
        },
    )
}

pub async fn unsubscribe_wait_pack_name(
    repos: &Repositories,
    state: &ConversationState,
    message: &InboundMessage,
) -> Result<Transition, DomainError> {
    let Input::Text(name) = message.input() else {
        return Ok(Transition::stay(state, replies::WAITING_PACK_TO_UNSUBSCRIBE));
    };

    Ok(
        match repos
            .subscriptions
            .unsubscribe(name, message.user_id)
            .await
            .split_infrastructure()?
        {
            Ok(true) => Transition::done(replies::UNSUBSCRIBED),
            Ok(false) => Transition::done(replies::NEVER_SUBSCRIBED),
            Err(PackError::Deleted(_)) => Transition::done(replies::PACK_DELETED),
            Err(PackError::InvalidName(_)) => Transition::stay(state, replies::INVALID_NAME),
            Err(_) => Transition::stay(state, replies::NO_SUCH_PACK),
        },
    )
}

pub async fn delete_gif_wait_pack_name(
    repos: &Repositories,
    state: &ConversationState,
    message: &InboundMessage,
) -> Result<Transition, DomainError> {
    let Input::Text(name) = message.input() else {
        return Ok(Transition::stay(state, replies::WAITING_PACK_TO_DELETE_FROM));
    };

    Ok(match repos.packs.get(name).await.split_infrastructure()? {
        Ok(pack) if PackRepository::has_edit_permission(&pack, message.user_id) => {
            Transition::advance(
                ConversationState::DeleteGifWaitClip {
                    pack: pack.name().clone(),
                },
                replies::ASK_CLIP_TO_DELETE,
            )
        }
        Ok(_) => Transition::done(replies::NOT_ALLOWED_TO_DELETE),
        Err(PackError::InvalidName(_)) => Transition::stay(state, replies::INVALID_NAME),
        Err(PackError::Deleted(_)) => Transition::stay(state, replies::PACK_DELETED),
        Err(_) => Transition::stay(state, replies::NO_SUCH_PACK),
    })
}

pub async fn delete_gif_wait_clip(
    repos: &Repositories,
    state: &ConversationState,
    message: &InboundMessage,
    pack: &PackName,
) -> Result<Transition, DomainError> {
    let Input::Clip(clip_id) = message.input() else {
        return Ok(Transition::stay(state, replies::WAITING_CLIP_TO_DELETE));
    };

    Ok(
        match repos
            .clips
            .delete(pack.as_str(), message.user_id, clip_id)
            .await
            .split_infrastructure()?
        {
            Ok(true) => Transition::done(replies::CLIP_DELETED),
            Ok(false) => Transition::done(replies::CLIP_NOT_IN_PACK),
            Err(PackError::NotAllowed) => Transition::done(replies::NOT_ALLOWED_TO_DELETE),
            Err(_) => Transition::done(replies::PACK_GONE),
        },
    )
}
