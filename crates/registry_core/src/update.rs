use crate::form::FormNotice;
use crate::listing::ListingState;
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
///
/// This is also where the form and the listing are wired together: a
/// [`FormNotice::UserAdded`] refreshes the listing if one is mounted.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FieldEdited { field, value } => {
            state.form.update_field(field, value);
            Vec::new()
        }
        Msg::SubmitClicked => state.form.submit(),
        Msg::UserCreated(result) => {
            let (mut effects, notice) = state.form.apply_create_result(result);
            if let Some(notice) = notice {
                effects.extend(on_form_notice(&mut state, notice));
            }
            effects
        }
        Msg::FormResetElapsed { token } => {
            state.form.reset_elapsed(token);
            Vec::new()
        }
        Msg::FormDisposed => state.form.dispose(),
        Msg::ListingMounted => {
            // Mounting twice must not repeat the initial load.
            if state.listing.is_some() {
                return (state, Vec::new());
            }
            let (listing, effects) = ListingState::mount();
            state.listing = Some(listing);
            effects
        }
        Msg::ListingUnmounted => {
            if state.listing.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::RefreshClicked => match state.listing.as_mut() {
            Some(listing) => listing.refresh(),
            None => Vec::new(),
        },
        Msg::UsersFetched(result) => {
            if let Some(listing) = state.listing.as_mut() {
                listing.apply_fetch_result(result);
            }
            Vec::new()
        }
        Msg::DeleteClicked { id } => match state.listing.as_ref() {
            Some(listing) => listing.request_delete(id),
            None => Vec::new(),
        },
        Msg::DeleteConfirmation { id, accepted } => match state.listing.as_ref() {
            Some(listing) => listing.confirm_delete(id, accepted),
            None => Vec::new(),
        },
        Msg::UserDeleted { result, .. } => match state.listing.as_mut() {
            Some(listing) => listing.apply_delete_result(result),
            None => Vec::new(),
        },
    };

    let form_changed = state.form.take_changed();
    let listing_changed = state
        .listing
        .as_mut()
        .is_some_and(ListingState::take_changed);
    if form_changed || listing_changed {
        state.mark_dirty();
    }

    (state, effects)
}

fn on_form_notice(state: &mut AppState, notice: FormNotice) -> Vec<Effect> {
    match notice {
        FormNotice::UserAdded => match state.listing.as_mut() {
            Some(listing) => listing.refresh(),
            None => Vec::new(),
        },
    }
}
