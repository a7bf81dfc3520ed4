// hazcat - ask a multimodal model whether an image contains a cat
//
// A call validates the image, pairs it with a fixed set of case rules,
// sends it to a Responses API endpoint and parses the reply into a
// strict two-field `Verdict`.

pub mod backend;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod media;
pub mod prompt;
pub mod validate;
pub mod verdict;

pub use backend::{HttpBackend, ModelBackend};
pub use client::HazCat;
pub use config::HazCatConfig;
pub use envelope::{ResponseEnvelope, extract_output_text};
pub use error::{EnvelopeDefect, Result, Stage, VerdictError};
pub use media::{ImageSubmission, MediaType};
pub use prompt::{CASE_RULES, ImageDetail, PromptBuilder, VerdictRequest};
pub use validate::MAX_IMAGE_BYTES;
pub use verdict::{Verdict, parse_verdict};
