//! User-facing reply sentences.

use crate::domain::foundation::CorrelationId;
use crate::domain::pack::Pack;
use crate::domain::subscription::Subscription;

pub const INVALID_NAME: &str = "Oh no! That was not a valid pack name. A pack name can only contain letters, numbers, hyphens and underscores.";
pub const INVALID_NAME_RETRY: &str =
    "Oh no! That was an invalid pack name. Did you spell it correctly?";
pub const PACK_DOES_NOT_EXIST: &str =
    "Oh no! That pack does not exist. Did you spell it correctly?";
pub const NO_SUCH_PACK: &str = "Oops! There doesn't seem to be any gif pack with that name.";
pub const PACK_DELETED: &str = "Oh no! That gif pack has been deleted.";
pub const PACK_GONE: &str = "Oh no! That gif pack is no longer available.";

// Create pack
pub const ASK_NEW_PACK_NAME: &str = "What do you want to call your new gif pack?";
pub const WAITING_NEW_PACK_NAME: &str =
    "Oops! I was waiting for you to send me a name for your new gif pack.";
pub const PACK_CREATED: &str = "Great! Your gif pack has been created.";
pub const PACK_NAME_TAKEN: &str = "Oh no! That pack name has already been taken.";

// Add clip
pub const ASK_PACK_TO_ADD_TO: &str = "Which pack do you want to add a new gif to?";
pub const WAITING_PACK_TO_ADD_TO: &str =
    "Oops! I was waiting for you to send me the name of the gif pack you want to add a new gif to.";
pub const NOT_ALLOWED_TO_ADD: &str = "Oops, it seems like you are not allowed to edit this pack. Only the pack creator and its contributors can add gifs to a pack.";
pub const ASK_CLIP_TO_ADD: &str = "Please send me the gif you want to add to this pack.";
pub const WAITING_CLIP_TO_ADD: &str = "Oops, I was waiting for you to send me a gif.";
pub const CLIP_ALREADY_IN_PACK: &str =
    "Oops, that gif is already part of this pack. Perhaps you wanted to edit its keywords instead?";
pub const ASK_KEYWORDS: &str = "Alright, now send me some keywords that describe this gif.";
pub const WAITING_KEYWORDS: &str =
    "Oops, I was waiting for you to send me some keywords for this gif.";
pub const CLIP_ADDED: &str = "Great! A new gif has been added to your gif pack.";

// Subscriptions
pub const ASK_PACK_TO_SUBSCRIBE: &str = "What is the name of the gif pack you want to subscribe to?";
pub const WAITING_PACK_TO_SUBSCRIBE: &str =
    "Oops, I was waiting for you to send me the name of the gif pack you want to subscribe to.";
pub const SUBSCRIBED: &str = "Great! You have been subscribed to this gif pack!";
pub const ALREADY_SUBSCRIBED: &str = "Don't worry, you are already subscribed to this gif pack!";
pub const ASK_PACK_TO_UNSUBSCRIBE: &str =
    "What is the name of the gif pack you want to unsubscribe from?";
pub const WAITING_PACK_TO_UNSUBSCRIBE: &str =
    "Oops, I was waiting for you to send me the name of the gif pack you want to unsubscribe from.";
pub const UNSUBSCRIBED: &str = "Great! You have been unsubscribed from that gif pack.";
pub const NEVER_SUBSCRIBED: &str =
    "Don't worry, it seems like you were never subscribed to that gif pack in the first place.";
pub const NO_SUBSCRIPTIONS: &str = "Oops! It looks like you haven't subscribed to any packs yet.";

// Delete clip
pub const ASK_PACK_TO_DELETE_FROM: &str = "Which gif pack do you want to delete a gif from?";
pub const WAITING_PACK_TO_DELETE_FROM: &str =
    "Oops, I was waiting for you to send me the name of the gif pack you want to delete a gif from.";
pub const NOT_ALLOWED_TO_DELETE: &str = "Oops, it seems like you are not allowed to edit this pack. Only the pack creator and its contributors can delete gifs from a pack.";
pub const ASK_CLIP_TO_DELETE: &str = "Please send me the gif you want to delete from this pack.";
pub const WAITING_CLIP_TO_DELETE: &str =
    "Oops, I was waiting for you to send me a gif to be deleted from this pack.";
pub const CLIP_DELETED: &str = "Great, that gif has been deleted!";
pub const CLIP_NOT_IN_PACK: &str =
    "Oops, I couldn't find that gif in this pack. Did you send the right one?";

// Pack management
pub const ADD_CONTRIBUTOR_USAGE: &str = "Usage: /addcontributor <pack name> <user id>";
pub const REMOVE_CONTRIBUTOR_USAGE: &str = "Usage: /removecontributor <pack name> <user id>";
pub const DELETE_PACK_USAGE: &str = "Usage: /deletepack <pack name>";
pub const ONLY_CREATOR: &str = "Oops, only the creator of this pack can do that.";
pub const CONTRIBUTOR_ADDED: &str = "Great! That user can now add gifs to this pack.";
pub const ALREADY_CONTRIBUTOR: &str = "Don't worry, that user can already add gifs to this pack.";
pub const CONTRIBUTOR_REMOVED: &str = "Great! That user can no longer add gifs to this pack.";
pub const NOT_A_CONTRIBUTOR: &str = "Don't worry, that user was not a contributor to this pack.";
pub const PACK_REMOVED: &str = "Your gif pack has been deleted.";

pub const CANCELLED: &str = "Command cancelled!";

pub fn version(version: &str) -> String {
    format!("Clip Pack Bot version {}", version)
}

pub fn something_went_wrong(correlation_id: CorrelationId) -> String {
    format!("Oh no! Something went wrong. Request Id: `{}`", correlation_id)
}

/// Listing for `/mypacks`.
pub fn my_packs(created: &[Pack], contributed: &[Pack]) -> String {
    let mut text = String::new();

    if created.is_empty() {
        text.push_str("You have not created any gif packs.\n");
    } else {
        text.push_str("Here are the gif packs you have created:\n");
        push_numbered(&mut text, created.iter().map(|p| p.name().as_str()));
    }

    if contributed.is_empty() {
        text.push_str("You are not a contributor to any gif packs.");
    } else {
        text.push_str("Here are the gif packs you are a contributor to:\n");
        push_numbered(&mut text, contributed.iter().map(|p| p.name().as_str()));
    }

    text
}

/// Listing for `/subscriptions`.
pub fn my_subscriptions(subscriptions: &[Subscription]) -> String {
    if subscriptions.is_empty() {
        return NO_SUBSCRIPTIONS.to_string();
    }
    let mut text = String::from("Here are the packs you are currently subscribed to:\n");
    push_numbered(&mut text, subscriptions.iter().map(|s| s.pack.as_str()));
    text
}

fn push_numbered<'a>(text: &mut String, names: impl Iterator<Item = &'a str>) {
    for (i, name) in names.enumerate() {
        text.push_str(&format!("{}. {}\n", i + 1, name));
    }
}
