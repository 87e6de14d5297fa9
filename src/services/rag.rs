//! Retrieval-augmented answers for the textbook assistant.
//!
//! DESIGN
//! ======
//! A query triggers one vector search and at most one chat completion. Both
//! integrations are optional and fallible; neither failure reaches the
//! caller. A failed or unconfigured search behaves like an empty collection
//! and yields the fixed apology. A failed or unconfigured completion yields
//! the fixed error reply. Only the chat-history writes can fail a request.
//!
//! SYSTEM CONTEXT
//! ==============
//! `routes::chatbot` calls `process_query` for session queries and
//! `answer_selected_text` for questions about a highlighted passage.

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::llm::{Message, Sampling};
use crate::services::chat::{self, ChatError, MessageRole};
use crate::state::AppState;
use crate::vector::ScoredPassage;

pub const NO_RESULTS_MESSAGE: &str = "I couldn't find specific information about that topic in the textbook. \
                                      Please check the relevant chapters or ask a more specific question.";
pub const ERROR_MESSAGE: &str = "I encountered an error while processing your request. Please try again.";

const CONTEXT_CONFIDENCE: f64 = 0.8;
const SELECTED_TEXT_CONFIDENCE: f64 = 0.9;

const CONTEXT_STEPS: [&str; 3] = [
    "Retrieved relevant textbook content",
    "Formulated context-aware prompt",
    "Generated response using AI model",
];
const SELECTED_TEXT_STEPS: [&str; 2] = ["Focused on selected text", "Generated response based on selected text"];

/// Assistant reply returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatAnswer {
    pub message: String,
    pub sources: Vec<String>,
    pub confidence: f64,
    pub reasoning_steps: Vec<&'static str>,
}

// =============================================================================
// PROMPTS
// =============================================================================

#[must_use]
pub fn context_prompt(context: &str, query: &str) -> String {
    format!(
        "You are an AI assistant for the Physical AI & Humanoid Robotics Textbook.\n\
         Answer the user's question based on the following context from the textbook:\n\n\
         Context: {context}\n\n\
         User question: {query}\n\n\
         Please provide a helpful answer based on the textbook content. \
         If the context doesn't contain the information needed, say so politely."
    )
}

#[must_use]
pub fn selected_text_prompt(selected_text: &str, query: &str) -> String {
    format!(
        "You are an AI assistant for the Physical AI & Humanoid Robotics Textbook.\n\
         The user has selected the following text and has a question about it:\n\n\
         Selected text: {selected_text}\n\n\
         User question: {query}\n\n\
         Please provide an answer that is directly based on the selected text."
    )
}

// =============================================================================
// INTEGRATIONS
// =============================================================================

/// Nearest passages for `query`. Errors and a missing vector store both
/// come back as an empty list.
pub async fn retrieve(state: &AppState, query: &str) -> Vec<ScoredPassage> {
    let Some(vector) = state.vector.as_ref() else {
        warn!("vector store not configured; retrieval skipped");
        return Vec::new();
    };
    match vector.search(query, state.chatbot.retrieval_top_k, None).await {
        Ok(passages) => passages,
        Err(e) => {
            warn!(error = %e, "vector search failed");
            Vec::new()
        }
    }
}

/// One completion for `prompt`, or [`ERROR_MESSAGE`].
async fn complete(state: &AppState, prompt: String) -> String {
    let Some(llm) = state.llm.as_ref() else {
        warn!("LLM not configured; returning error reply");
        return ERROR_MESSAGE.to_string();
    };
    let sampling = Sampling { max_tokens: state.chatbot.max_tokens, temperature: state.chatbot.temperature };
    match llm.chat(sampling, "", &[Message::user(prompt)]).await {
        Ok(response) => {
            info!(
                model = %response.model,
                input_tokens = response.input_tokens,
                output_tokens = response.output_tokens,
                "assistant reply generated"
            );
            response.text
        }
        Err(e) => {
            warn!(error = %e, "chat completion failed");
            ERROR_MESSAGE.to_string()
        }
    }
}

// =============================================================================
// ANSWERS
// =============================================================================

/// Retrieve, prompt, complete. Touches no chat history.
pub async fn answer_with_context(state: &AppState, query: &str) -> ChatAnswer {
    let passages = retrieve(state, query).await;
    let (message, sources) = if passages.is_empty() {
        (NO_RESULTS_MESSAGE.to_string(), Vec::new())
    } else {
        let context = passages
            .iter()
            .map(|p| p.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let sources = passages.into_iter().map(|p| p.source).collect();
        (complete(state, context_prompt(&context, query)).await, sources)
    };
    ChatAnswer {
        message,
        sources,
        confidence: CONTEXT_CONFIDENCE,
        reasoning_steps: CONTEXT_STEPS.to_vec(),
    }
}

/// Answer strictly from `selected_text`. No retrieval and no history.
pub async fn answer_selected_text(state: &AppState, query: &str, selected_text: &str) -> ChatAnswer {
    let message = complete(state, selected_text_prompt(selected_text, query)).await;
    ChatAnswer {
        message,
        sources: vec!["selected_text".into()],
        confidence: SELECTED_TEXT_CONFIDENCE,
        reasoning_steps: SELECTED_TEXT_STEPS.to_vec(),
    }
}

/// Record the user turn, answer it, record the assistant turn.
///
/// # Errors
///
/// Returns a database error if either history write fails.
pub async fn process_query(
    state: &AppState,
    session_id: Uuid,
    query: &str,
    user_id: Option<Uuid>,
) -> Result<ChatAnswer, ChatError> {
    chat::add_message(&state.pool, session_id, MessageRole::User, query, user_id).await?;
    let answer = answer_with_context(state, query).await;
    chat::add_message(&state.pool, session_id, MessageRole::Assistant, &answer.message, user_id).await?;
    info!(%session_id, sources = answer.sources.len(), "chat query answered");
    Ok(answer)
}

#[cfg(test)]
#[path = "rag_test.rs"]
mod tests;
