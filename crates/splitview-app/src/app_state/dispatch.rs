//! Command dispatch: one handler per [`Command`] variant.

use splitview_common::{Command, Event, Notice, NoticeKind, SplitViewError};

use super::core::SplitViewApp;
use super::reply::Reply;

/// Title shown on every notice.
const NOTICE_TITLE: &str = "Split View";

impl SplitViewApp {
    /// Run one command to completion.
    ///
    /// User-visible failures are also published as a [`Notice`]. The menu
    /// is republished after any command that may have changed the
    /// registry, whether it succeeded or not.
    pub async fn handle(&mut self, command: Command) -> Result<Reply, SplitViewError> {
        let label = command.label();
        let mutating = command.is_mutating();
        tracing::debug!(command = label, "dispatching command");

        let result = match command {
            Command::SplitSelected { items } => self.split_selected(items).await,
            Command::GetView { view_id } => self.get_view(&view_id),
            Command::RenameView { view_id, name } => self.rename_view(&view_id, &name),
            Command::CloseView { view_id } => self.close_view(&view_id).await,
            Command::AddToView {
                view_id,
                url,
                title,
            } => self.add_to_view(&view_id, &url, &title).await,
            Command::MenuClicked {
                menu_item_id,
                url,
                title,
            } => self.menu_clicked(&menu_item_id, &url, &title).await,
            Command::RemovePanel { view_id, url } => self.remove_panel(&view_id, &url).await,
            Command::UpdateUrls { view_id, urls } => self.update_urls(&view_id, urls).await,
            Command::PanelNavigated {
                view_id,
                index,
                url,
            } => self.panel_navigated(&view_id, index, &url),
            Command::ShowAnyway { view_id, url } => self.show_anyway(&view_id, &url),
            Command::SurfaceClosed { surface } => self.surface_closed(surface).await,
            Command::SurfaceFocused { surface } => self.surface_focused(surface).await,
            Command::ResolveUrl { url } => Ok(Reply::Verdict(self.resolver.resolve(&url).await)),
            Command::SaveOptions { options } => self.save_options(&options).await,
            Command::ReloadConfig => self.reload_config().await,
            Command::OpenOptions => self.open_options().await,
            Command::Installed { reason } => self.installed(&reason).await,
            Command::Shutdown => self.shutdown(),
        };

        if let Err(e) = &result {
            self.report(label, e);
        }
        if mutating {
            self.publish_menu(false);
        }
        result
    }

    fn report(&self, label: &str, error: &SplitViewError) {
        match notice_for(error) {
            Some(notice) => {
                tracing::warn!(command = label, error = %error, "command failed");
                self.event_bus.publish(Event::Notice(notice));
            }
            None => tracing::debug!(command = label, error = %error, "command failed quietly"),
        }
    }
}

/// The notice shown for a failure, if the user should see it.
pub(super) fn notice_for(error: &SplitViewError) -> Option<Notice> {
    if !error.is_user_visible() {
        return None;
    }
    let body = error.to_string();
    Some(match error {
        SplitViewError::InsufficientSelection { .. } => {
            Notice::warning(NoticeKind::InsufficientSelection, NOTICE_TITLE, body)
        }
        SplitViewError::CapacityExceeded { .. } => {
            Notice::warning(NoticeKind::CapacityExceeded, NOTICE_TITLE, body)
        }
        _ => Notice::error(NoticeKind::SurfaceCreationFailed, NOTICE_TITLE, body),
    })
}

pub(super) fn fallback_notice(refused: &[String]) -> Notice {
    Notice::warning(
        NoticeKind::FramingFallback,
        NOTICE_TITLE,
        format!(
            "{} cannot be shown in frames; opened in separate windows",
            refused.join(", ")
        ),
    )
}

pub(super) fn options_saved_notice() -> Notice {
    Notice::info(NoticeKind::OptionsSaved, NOTICE_TITLE, "Options saved")
}
