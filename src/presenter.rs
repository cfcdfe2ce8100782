//! HTML rendering of the chat view
//!
//! The page is rendered once on load; afterwards the browser swaps in the
//! transcript fragment pushed over the event stream.

use crate::state_machine::ChatView;
use maud::{html, Markup, DOCTYPE};

pub const PAGE_TITLE: &str = "Latest News Agent";

const LOADING_TEXT: &str = "Loading...";
const INPUT_PLACEHOLDER: &str = "Type your response...";

pub fn render_page(view: &ChatView) -> String {
    let locked = !view.accepting_input;

    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (PAGE_TITLE) }
                link rel="stylesheet" href="/assets/style.css";
                script src="/assets/app.js" defer {}
            }
            body {
                main class="chat" {
                    header class="chat-header" {
                        h1 { (PAGE_TITLE) }
                        button type="button" id="clear-history" class="subtle" disabled[locked] {
                            "Clear history"
                        }
                    }
                    (transcript_markup(view))
                    (composer(view))
                }
            }
        }
    };

    markup.into_string()
}

/// The transcript list on its own, as pushed to connected pages
pub fn render_transcript(view: &ChatView) -> String {
    transcript_markup(view).into_string()
}

fn transcript_markup(view: &ChatView) -> Markup {
    let transcript = &view.transcript;

    html! {
        ul id="transcript" class="transcript" {
            @if transcript.is_empty() && transcript.error().is_none() {
                li class="placeholder" { (LOADING_TEXT) }
            }
            @for turn in transcript.turns() {
                li class={ "turn " (turn.author.as_str()) } { (turn.message) }
            }
            @if let Some(error) = transcript.error() {
                li class="turn error" role="alert" { (error) }
            }
        }
    }
}

fn composer(view: &ChatView) -> Markup {
    let locked = !view.accepting_input;

    html! {
        // Submitted by the page script as JSON
        form id="composer" class="composer" {
            input type="text"
                name="userInput"
                placeholder=(INPUT_PLACEHOLDER)
                autocomplete="off"
                required
                disabled[locked];
            button type="submit" disabled[locked] {
                @if view.is_pending() { "Sending..." } @else { "Send" }
            }
        }
    }
}
