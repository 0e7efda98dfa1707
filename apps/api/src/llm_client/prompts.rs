// Shared prompt fragments. Each module that calls the LLM keeps its own prompts.rs
// alongside it; only cross-cutting instructions live here.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
