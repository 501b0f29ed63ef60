//! Prompt templates for the describe, translate and evaluate stages.

use super::describe::Description;

pub const DESCRIBE_SYSTEM_PROMPT: &str = "\
You are a language analysis assistant. Your task is to analyze and describe the language of a given text based on specific points. When analyzing, ensure that each section is clearly labeled for easy parsing. The analysis should include:

1. Style: Describe whether the language is formal, casual, technical, poetic, or conversational. Comment on the level of sophistication or simplicity. Use the label `<<Style>>`.
2. Tone: Identify the tone—whether it’s friendly, authoritative, sarcastic, neutral, or passionate—and explain how it influences the reader’s perception. Use the label `<<Tone>>`.
3. Nuances: Discuss any connotations, implied meanings, or subtle cues within the text. Does it hint at additional context or unspoken messages? Use the label `<<Nuances>>`.
4. Explain the main purpose behind the language—does it aim to inform, persuade, entertain, inspire, or provoke thought? Use the label `<<Intent>>`.
5. Cultural Meaning: Note if there are any cultural references or idioms specific to `{SRC_LANG}` that add cultural significance or depth to the text. Use the label `<<CulturalMeaning>>`.
6. Symbolism: Look for metaphors, symbols, or descriptive language that add layers of meaning or evoke imagery. Describe how these elements contribute to the overall depth of the message. Use the label `<<Symbolism>>`.
";

pub const DESCRIBE_MAIN_PROMPT: &str = "\
Given a text in `{SRC_LANG}`, please analyze and describe the language used based on the following points. For each point, start with the corresponding label to make parsing easier.

Example:
1. \"Don't just dream of success, wake up and work for it every single day!\"

<<Style>>: Motivational and direct, using informal and accessible language.
<<Tone>>: Encouraging and assertive, aimed at inspiring action.
<<Nuances>>: The phrase “wake up and work for it” suggests that effort is a key component of success.
<<Intent>>: To inspire and motivate readers toward personal growth and hard work.
<<CulturalMeaning>>: Common in self-help and motivational contexts, this phrase appeals to a universal desire for achievement.
<<Symbolism>>: The metaphor of “waking up” symbolizes awareness and readiness, while “work” implies dedication.

2. \"In the heart of every city, there’s a story waiting to be told.\"

<<Style>>: Poetic and reflective, evoking a sense of mystery.
<<Tone>>: Thoughtful and nostalgic, inviting readers to reflect on urban life.
<<Nuances>>: The phrase implies that cities are more than just places; they hold rich, untold histories.
<<Intent>>: To entertain and provoke thought about the richness of city life.
<<CulturalMeaning>>: Reflects a value for storytelling and the human experiences embedded within urban environments.
<<Symbolism>>: The “heart” of a city personifies it, suggesting vibrancy, life, and depth.

3. \"This product is designed with you in mind—tested by experts, trusted by thousands.\"

<<Style>>: Formal and professional, with language tailored for a commercial audience.
<<Tone>>: Trustworthy and authoritative, instilling confidence in the reader.
<<Nuances>>: Subtly implies high quality through the appeal to authority (“experts”) and popularity (“thousands”).
<<Intent>>: To persuade readers of the product’s reliability and value.
<<CulturalMeaning>>: In marketing, phrases like “tested by experts” are common and build brand credibility.
<<Symbolism>>: The use of “trusted by thousands” serves as a symbol of social proof, reinforcing product quality.

4. \"What a shock—who would have guessed the sun rises in the east!\"

<<Style>>: Casual and colloquial, using an ironic expression.
<<Tone>>: Sarcastic and playful, adding a humorous edge.
<<Nuances>>: The phrase suggests something obvious, with an undertone of mocking surprise.
<<Intent>>: To entertain and subtly criticize the predictability of an event.
<<CulturalMeaning>>: Sarcasm here plays on a universally understood concept, adding a layer of humor that may differ in impact based on cultural familiarity with irony.
<<Symbolism>>: The “sun rises in the east” serves as a symbol for a predictable or well-known fact, making it both relatable and humorous.

5. \"Idk about u but I think u should get some help or sth.\"

<<Style>>: Very casual and conversational, using shorthand and informal language.
<<Tone>>: Lightly concerned yet nonchalant, with a hint of friendly advice.
<<Nuances>>: The use of “Idk” (I don’t know) and “u” (you) suggests a relaxed, personal approach, while “get some help or sth” (something) conveys mild concern without being overly serious.
<<Intent>>: To suggest seeking assistance in a low-pressure way, without pushing too hard.
<<CulturalMeaning>>: The shorthand language (e.g., “u,” “sth”) is typical of texting or online communication among friends, signaling casual and familiar interaction.
<<Symbolism>>: No deep symbolism, but the language choice reflects a casual approach to offering advice, making it feel like friendly guidance rather than a formal recommendation.

Query: {QUERY}
";

pub const TRANSLATE_SYSTEM_PROMPT: &str = "\
You are a translation assistant. Your task is to translate text from one language to another while considering the context provided in the description. When translating, keep the following guidelines in mind:

1. Context Awareness: Pay attention to the context described, including the tone, style, and purpose of the text. This will help ensure that the translation is appropriate for the intended audience.
2. Preservation of Nuances: Maintain the original meaning and subtleties of the text. Be aware of any cultural references or idioms that may need adaptation in the target language.
3. Tone Consistency: Reflect the tone indicated in the description. For example, if the tone is formal, ensure the translation uses appropriate language and phrasing.
4. Clarity and Readability: Ensure that the translated text is clear and easy to understand in the target language. Avoid overly complex structures unless the source text is similarly complex.
5. Terminology: Use relevant terminology that aligns with the subject matter of the text, especially for technical or specialized content.

Your response should include the translated text based on the context provided and nothing more. Do not include the original text in the translation. Do not include sentences like \"Here’s the translation based on the provided description\", as this will be handled by the system.
";

pub const TRANSLATE_MAIN_PROMPT: &str = "\
Given a description of a text:
{DESCRIPTION}

Help me translate this text from {SRC_LANG} to {DEST_LANG}:
{QUERY}
";

pub const TRANSLATE_MAIN_NO_DESC_PROMPT: &str = "\
Help me translate this text from {SRC_LANG} to {DEST_LANG}:
{QUERY}
";

pub const EVALUATE_SYSTEM_PROMPT: &str = "\
You are a translation evaluator. Your task is to assess the quality of a translation based on specific criteria. When evaluating the translation, consider the following:

1. Accuracy: Does the translation accurately convey the meaning of the original text while maintaining a clear sentence structure?
2. Clarity: Is the translation easy to understand for the intended audience?
3. Style and Tone: Does the translation preserve the style and tone of the original text?

Your response should include special tokens to indicate your answers clearly:

- <<Accuracy>>: \"yes\" or \"no\"
- <<Clarity>>: \"yes\" or \"no\"
- <<StyleAndTone>>: \"yes\" or \"no\"
";

pub const EVALUATE_MAIN_PROMPT: &str = "\
Given a translation from {SRC_LANG} to {DEST_LANG}:
Query:
{QUERY}

Translation:
{TRANSLATION}

Please evaluate the quality of the translation you have produced.

1. Does the translation accurately convey the meaning and maintain a clear sentence structure?
2. Is the translation easy to understand for the reader?
3. Does the translation preserve the style and tone of the original text?

Answer each question with the special tokens:

- <<Accuracy>>:
- <<Clarity>>:
- <<StyleAndTone>>:
";

/// Substitutes `{KEY}` placeholders in a single pass.
///
/// Substituted values are never rescanned, so user text that happens to
/// contain `{QUERY}` reaches the model verbatim.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];

        let hit = values.iter().find(|(key, _)| {
            tail.strip_prefix(key)
                .is_some_and(|after| after.starts_with('}'))
        });

        if let Some((key, value)) = hit {
            out.push_str(value);
            rest = &tail[key.len() + 1..];
        } else {
            out.push('{');
            rest = tail;
        }
    }

    out.push_str(rest);
    out
}

pub fn describe_system_prompt(source_language: &str) -> String {
    render(DESCRIBE_SYSTEM_PROMPT, &[("SRC_LANG", source_language)])
}

pub fn describe_prompt(source_language: &str, query: &str) -> String {
    render(
        DESCRIBE_MAIN_PROMPT,
        &[("SRC_LANG", source_language), ("QUERY", query)],
    )
}

/// Builds the translation request, with description context when available.
pub fn translate_prompt(
    source_language: &str,
    target_language: &str,
    query: &str,
    description: Option<&Description>,
) -> String {
    match description {
        Some(description) => render(
            TRANSLATE_MAIN_PROMPT,
            &[
                ("DESCRIPTION", description.to_context().as_str()),
                ("SRC_LANG", source_language),
                ("DEST_LANG", target_language),
                ("QUERY", query),
            ],
        ),
        None => render(
            TRANSLATE_MAIN_NO_DESC_PROMPT,
            &[
                ("SRC_LANG", source_language),
                ("DEST_LANG", target_language),
                ("QUERY", query),
            ],
        ),
    }
}

pub fn evaluate_prompt(
    source_language: &str,
    target_language: &str,
    query: &str,
    translation: &str,
) -> String {
    render(
        EVALUATE_MAIN_PROMPT,
        &[
            ("SRC_LANG", source_language),
            ("DEST_LANG", target_language),
            ("QUERY", query),
            ("TRANSLATION", translation),
        ],
    )
}
