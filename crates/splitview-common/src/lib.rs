pub mod actions;
pub mod errors;
pub mod events;
pub mod id;
pub mod notifications;
pub mod types;

pub use actions::{Command, InstallReason, OptionsUpdate, SelectedItem};
pub use errors::{ConfigError, HostError, SplitViewError, StorageError};
pub use events::{Event, EventBus};
pub use id::{new_correlation_id, new_id, ViewId};
pub use notifications::{Notice, NoticeKind, NoticeLevel};
pub use types::{
    DisplayMode, FallbackStyle, MenuEntry, OverrideScope, PanelState, ScreenRect, SurfaceId,
    ViewState,
};

pub type Result<T> = std::result::Result<T, SplitViewError>;
