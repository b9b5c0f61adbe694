//! Prompt assembly for the text, illustration and character services.

use crate::pages::{MAX_PAGES, MIN_PAGES};
use crate::request::StoryRequest;

/// System prompt for story text generation.
pub const STORY_SYSTEM_PROMPT: &str = "You are a children's story writer. \
     Create engaging, age-appropriate stories that are magical and educational.";

/// System prompt for character profile extraction.
pub const CHARACTER_SYSTEM_PROMPT: &str = "You are a character profile extractor. \
     Extract character details from stories and return only valid JSON.";

/// Character budget for the page excerpt embedded in an illustration prompt.
pub const IMAGE_EXCERPT_MAX_CHARS: usize = 200;

/// Character budget for the story excerpt embedded in the extraction prompt.
pub const CHARACTER_EXCERPT_MAX_CHARS: usize = 1000;

/// Style suffix appended to every illustration prompt.
const IMAGE_STYLE_SUFFIX: &str = "colorful, whimsical, kid-friendly, digital art";

/// User prompt for story text generation.
pub fn story_prompt(request: &StoryRequest) -> String {
    format!(
        "Create a delightful, age-appropriate children's story for a {age}-year-old \
         child named {name}. The story should incorporate their interests: {interests}. \
         Make it engaging, positive, and magical. Include {name} as the main character. \
         Format the story with clear paragraphs for each page \
         (aim for {MIN_PAGES}-{MAX_PAGES} pages).",
        age = request.age,
        name = request.child_name,
        interests = request.interests,
    )
}

/// Illustration prompt for one page. The page text is clipped to
/// [`IMAGE_EXCERPT_MAX_CHARS`] so long pages cannot blow the image
/// model's prompt window.
pub fn image_prompt(page_text: &str) -> String {
    format!(
        "Children's book illustration, {}, {IMAGE_STYLE_SUFFIX}",
        truncate_chars(page_text, IMAGE_EXCERPT_MAX_CHARS),
    )
}

/// User prompt for character extraction. Asks for a JSON object with
/// `appearance` and `personality` fields.
pub fn character_prompt(story_text: &str, request: &StoryRequest) -> String {
    format!(
        "Based on this children's story, extract the main character's details:\n\n\
         Story: {story}\n\n\
         The main character is {name}, age {age}. Extract and provide:\n\
         1. Appearance: Physical description (hair color, clothing, distinctive features)\n\
         2. Personality: Character traits, behaviors, interests (from: {interests})\n\n\
         Respond in JSON format:\n\
         {{\n  \"appearance\": \"description here\",\n  \"personality\": \"traits here\"\n}}",
        story = truncate_chars(story_text, CHARACTER_EXCERPT_MAX_CHARS),
        name = request.child_name,
        age = request.age,
        interests = request.interests,
    )
}

/// Returns a prefix of at most `max_chars` characters, never splitting
/// a multibyte character.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
