//! Property-based tests for the state machine
//!
//! These tests verify the reconciliation invariants hold across arbitrary
//! event sequences, including completions that arrive out of turn.

use super::*;
use crate::backend::{BackendError, BackendErrorKind};
use crate::transcript::{Turn, GREETING, SUBMIT_FAILED_MESSAGE};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_turn() -> impl Strategy<Value = Turn> {
    (any::<bool>(), "[a-zA-Z ?!]{1,30}").prop_map(|(is_user, message)| {
        if is_user {
            Turn::user(message)
        } else {
            Turn::agent(message)
        }
    })
}

fn arb_turns() -> impl Strategy<Value = Vec<Turn>> {
    proptest::collection::vec(arb_turn(), 0..6)
}

fn arb_backend_error() -> impl Strategy<Value = BackendError> {
    (
        prop_oneof![
            Just(BackendErrorKind::Connectivity),
            Just(BackendErrorKind::Server),
            Just(BackendErrorKind::MalformedResponse),
        ],
        "[a-z ]{1,20}",
    )
        .prop_map(|(kind, message)| BackendError::new(kind, message))
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_turns().prop_map(|turns| Event::HistoryLoaded { turns }),
        arb_backend_error().prop_map(|error| Event::HistoryFailed { error }),
        "[a-z]{1,10}".prop_map(|input| Event::UserSubmit { input }),
        Just(Event::ResetRequested),
        arb_turns().prop_map(|turns| Event::ExchangeSucceeded { turns }),
        arb_backend_error().prop_map(|error| Event::ExchangeFailed { error }),
        Just(Event::ResetSucceeded),
        arb_backend_error().prop_map(|error| Event::ResetFailed { error }),
    ]
}

fn arb_idle_state() -> impl Strategy<Value = ChatState> {
    (arb_turns(), proptest::option::of("[a-zA-Z .]{1,30}")).prop_map(|(turns, error)| {
        let mut state = ChatState::new();
        state.phase = Phase::Idle;
        state.transcript.replace_turns(turns);
        if let Some(error) = error {
            state.transcript.set_error(error);
        }
        state
    })
}

fn submit(state: &ChatState, input: &str) -> ChatState {
    transition(
        state,
        Event::UserSubmit {
            input: input.to_string(),
        },
    )
    .unwrap()
    .new_state
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Successful exchange: turns equal exactly what the server returned
    #[test]
    fn prop_success_adopts_server_transcript(
        state in arb_idle_state(),
        returned in arb_turns(),
    ) {
        let pending = submit(&state, "hello");
        let done = transition(&pending, Event::ExchangeSucceeded { turns: returned.clone() })
            .unwrap()
            .new_state;

        prop_assert_eq!(done.transcript.turns(), returned.as_slice());
        prop_assert_eq!(done.transcript.error(), None);
        prop_assert_eq!(done.submission_state(), SubmissionState::Idle);
    }

    // Failed exchange: turns unchanged, error set, back to idle
    #[test]
    fn prop_failure_preserves_turns(
        state in arb_idle_state(),
        error in arb_backend_error(),
    ) {
        let before = state.transcript.turns().to_vec();
        let pending = submit(&state, "hello");
        let done = transition(&pending, Event::ExchangeFailed { error }).unwrap().new_state;

        prop_assert_eq!(done.transcript.turns(), before.as_slice());
        prop_assert_eq!(done.transcript.error(), Some(SUBMIT_FAILED_MESSAGE));
        prop_assert_eq!(done.submission_state(), SubmissionState::Idle);
    }

    // While pending, another submit is rejected and nothing changes
    #[test]
    fn prop_second_submit_rejected_while_pending(
        state in arb_idle_state(),
        first in "[a-z]{1,10}",
        second in "[a-z]{1,10}",
    ) {
        let pending = submit(&state, &first);
        let result = transition(&pending, Event::UserSubmit { input: second });
        prop_assert_eq!(result.unwrap_err(), TransitionError::SubmissionPending);
    }

    // Reset always lands on the single greeting, whatever came before
    #[test]
    fn prop_reset_yields_greeting(state in arb_idle_state()) {
        let clearing = transition(&state, Event::ResetRequested).unwrap().new_state;
        let done = transition(&clearing, Event::ResetSucceeded).unwrap().new_state;
        prop_assert_eq!(done.transcript.turns(), &[Turn::agent(GREETING)]);
    }

    // Arbitrary sequences: remote calls only start from Idle, at most one is
    // outstanding, and turns change only on completion events
    #[test]
    fn prop_single_flight_and_no_local_append(
        events in proptest::collection::vec(arb_event(), 0..30)
    ) {
        let mut state = ChatState::new();
        // The startup fetch is outstanding from the beginning
        let mut outstanding = 1usize;

        for event in events {
            let completes = matches!(
                event,
                Event::HistoryLoaded { .. }
                    | Event::HistoryFailed { .. }
                    | Event::ExchangeSucceeded { .. }
                    | Event::ExchangeFailed { .. }
                    | Event::ResetSucceeded
                    | Event::ResetFailed { .. }
            );
            let turns_before = state.transcript.turns().to_vec();
            let was_idle = state.accepts_input();

            match transition(&state, event) {
                Ok(result) => {
                    let started = result.effects.iter().filter(|e| e.is_remote_call()).count();
                    if started > 0 {
                        prop_assert!(was_idle, "remote call started outside Idle");
                        prop_assert_eq!(started, 1);
                    }
                    if completes {
                        outstanding -= 1;
                    } else {
                        prop_assert_eq!(result.new_state.transcript.turns(), turns_before.as_slice());
                    }
                    outstanding += started;
                    prop_assert!(outstanding <= 1);
                    prop_assert_eq!(outstanding == 0, result.new_state.accepts_input());
                    state = result.new_state;
                }
                Err(_) => { /* Rejected or stray event, state untouched */ }
            }
        }
    }
}
