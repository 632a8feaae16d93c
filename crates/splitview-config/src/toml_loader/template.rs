//! Default TOML config template with inline documentation comments.

pub(crate) fn default_config_toml() -> &'static str {
    r##"# splitview configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[display]
# mode = "framed"            # framed | windowed
# warn_on_fallback = true    # tell me when a page refuses to be framed
# max_panels = 4             # 2-8

[framing]
# Hosts that always open in separate windows. Subdomains are included.
# force_windowed_domains = ["docs.google.com", "github.com"]
# probe_timeout_ms = 2500    # 100-30000
# fallback = "windowed"      # windowed | overlay
# override_scope = "view"    # view | persistent ("show anyway" lifetime)
# block_on_frame_ancestors_self = true
# strip_headers = true
# extension_origin = ""      # e.g. "moz-extension://<uuid>"

[history]
# enabled = true
# max_entries = 500          # 1-10000

[storage]
# views_scope = "session"    # session | install

[logging]
# level = "info"             # trace | debug | info | warn | error
"##
}
