//! Frame-permission resolution.
//!
//! Decides whether a page can be shown inside a framed view, and what a
//! view should do when one of its pages refuses. Three layers:
//!
//! - [`DomainRuleSet`]: user rules that force windowed display.
//! - [`HeaderProbe`]: a headers-only preflight, bounded by a timeout.
//! - [`HeaderRewritePolicy`]: strips the two anti-framing headers from
//!   sub-frame responses embedded by the view surface.

pub mod assess;
pub mod headers;
pub mod overrides;
pub mod policy;
pub mod probe;
pub mod resolver;
pub mod rewrite;
pub mod rules;
pub mod verdict;

pub use assess::{assess, AssessMode, Assessment};
pub use headers::{classify, HeaderPolicy};
pub use overrides::OverrideSet;
pub use policy::{compose, warning_domain, FramingPreferences, ViewPlan};
pub use probe::{HeaderProbe, HttpProbe, ProbeError, ProbedHeaders, StaticProbe};
pub use resolver::FrameResolver;
pub use rewrite::{HeaderRewritePolicy, ResourceType, ResponseContext};
pub use rules::{host_of, normalize_host, DomainRuleSet};
pub use verdict::FrameVerdict;
