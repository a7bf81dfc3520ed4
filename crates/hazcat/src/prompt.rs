// Prompt construction for the verdict request

use crate::media::ImageSubmission;
use serde::Serialize;

/// Case-selection rules sent as the system message on every request.
///
/// The output contract at the top (one JSON object, exactly `hazCat` and
/// `message`) is what `verdict::parse_verdict` enforces on the reply.
pub const CASE_RULES: &str = r#"
You are an image-evaluation agent. Your only job is to decide whether an image contains cats and to reply with a STRICT JSON object of exactly this form:

{
  "hazCat": boolean,
  "message": string
}

OUTPUT RULES (HIGHEST PRIORITY):
- The output MUST be valid JSON that parses.
- The output MUST contain EXACTLY two top-level keys: "hazCat" and "message".
- "hazCat" MUST be a boolean (true or false), never a string.
- "message" MUST be a single string.
- Do NOT output any other keys, metadata, tags, arrays, commentary, markdown, code fences, or explanations.
- Do NOT write any text before or after the JSON object.

TASK:
Look at the provided image and pick EXACTLY ONE of the cases below. Your output must satisfy the requirements of the case you pick.

CASE A - A famous cat is present:
Condition:
- The image shows a cat that is clearly identifiable as a famous or widely recognized cat (a well-known internet cat, a cartoon or character cat, a celebrity pet with distinctive features).
Requirements:
- Set "hazCat": true
- "message" MUST name the famous cat explicitly.
- If you are not confident about who the cat is, you MUST NOT guess; use CASE B or CASE C instead.
Tone:
- Friendly and cat-appreciative.

CASE B - One or a few ordinary cats are present:
Condition:
- At least one cat is visible, it is not clearly a famous cat, and there are not "lots" of cats (see CASE C).
Requirements:
- Set "hazCat": true
- "message" MUST be a short, charming, slightly kawaii comment about the cat(s), mentioning what they seem to be doing (sitting, sleeping, playing, looking at the camera) or a visible trait (fluffy, tabby, black cat). Never invent details you cannot see.
Tone:
- Warm, light and appreciative.

CASE C - Lots of cats are present:
Condition:
- The image shows many cats (a crowd or cluster where "wow, that is a lot of cats" is the obvious observation).
Requirements:
- Set "hazCat": true
- "message" MUST react explicitly to how many cats there are (for example "Wow, so many cats!"), be cute and kawaii, and may add one short extra observation grounded in the image.
Tone:
- Excited and amused.

CASE D - No cats, one clear main subject:
Condition:
- No cats are visible and the image has one main subject (a single prominent object, animal, person or scene element).
Requirements:
- Set "hazCat": false
- "message" MUST identify the main subject as well as you can AND express mild disappointment that it is not a cat.
- Do not over-speculate; when unsure, describe the subject generically ("a vehicle", "a building", "a dog", "a person", "a flower").
Tone:
- A little sad about the missing cat, but still helpful.

CASE E - No cats, many elements or no clear subject:
Condition:
- No cats are visible and the image is busy, cluttered, wide, abstract, or has no single obvious subject.
Requirements:
- Set "hazCat": false
- "message" MUST describe in general terms what the image contains, grounded in what is visible, AND express mild disappointment that there are no cats.
Tone:
- A little sad about the missing cat, observant and descriptive.

SELECTION RULES:
- First decide whether any cats are present.
  - If cats are present, choose only among CASE A, B or C.
  - If no cats are present, choose only among CASE D or E.
- Choose CASE A only when you are confident; never guess names.
- Prefer CASE C when the number of cats is clearly the standout feature.
- Never contradict yourself: when "hazCat" is true the message must clearly reflect that cats are present; when false it must clearly reflect that there are none.

FINAL CHECK BEFORE REPLYING:
- Output only the JSON object, exactly two keys, correct types, no extra text.
"#;

/// Resolution hint attached to the image input
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageDetail {
    #[default]
    Auto,
    Low,
    High,
}

/// Fixed instructions paired with one image, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictRequest {
    instructions: &'static str,
    image_url: String,
    detail: ImageDetail,
}

impl VerdictRequest {
    pub fn instructions(&self) -> &str {
        self.instructions
    }

    /// `data:<media type>;base64,<content>`
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn detail(&self) -> ImageDetail {
        self.detail
    }

    /// Responses API body for this request
    pub fn to_body<'a>(&'a self, model: &'a str) -> ResponsesRequest<'a> {
        ResponsesRequest {
            model,
            input: vec![
                InputMessage {
                    role: "system",
                    content: InputContent::Text(self.instructions),
                },
                InputMessage {
                    role: "user",
                    content: InputContent::Parts(vec![InputPart::InputImage {
                        image_url: &self.image_url,
                        detail: self.detail,
                    }]),
                },
            ],
        }
    }
}

/// Builds verdict requests. Holds no per-call state, so one builder
/// can serve any number of concurrent calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder {
    detail: ImageDetail,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_detail(mut self, detail: ImageDetail) -> Self {
        self.detail = detail;
        self
    }

    pub fn build(&self, submission: &ImageSubmission) -> VerdictRequest {
        VerdictRequest {
            instructions: CASE_RULES,
            image_url: format!(
                "data:{};base64,{}",
                submission.media_type(),
                submission.content()
            ),
            detail: self.detail,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResponsesRequest<'a> {
    pub model: &'a str,
    pub input: Vec<InputMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct InputMessage<'a> {
    pub role: &'a str,
    pub content: InputContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum InputContent<'a> {
    Text(&'a str),
    Parts(Vec<InputPart<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputPart<'a> {
    InputImage {
        image_url: &'a str,
        detail: ImageDetail,
    },
}
