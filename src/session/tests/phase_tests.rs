//! Unit tests for session phase transitions and domain validation.

use crate::error::ErrorKind;
use crate::session::domain::{
    InterfaceMode, SessionDomainError, SessionEndpoint, SessionPhase,
};
use rstest::rstest;

#[rstest]
#[case(SessionPhase::Disconnected, SessionPhase::Disconnected, false)]
#[case(SessionPhase::Disconnected, SessionPhase::Connected, true)]
#[case(SessionPhase::Disconnected, SessionPhase::PortsAcquired, false)]
#[case(SessionPhase::Connected, SessionPhase::Disconnected, true)]
#[case(SessionPhase::Connected, SessionPhase::Connected, false)]
#[case(SessionPhase::Connected, SessionPhase::PortsAcquired, true)]
#[case(SessionPhase::PortsAcquired, SessionPhase::Disconnected, true)]
#[case(SessionPhase::PortsAcquired, SessionPhase::Connected, false)]
#[case(SessionPhase::PortsAcquired, SessionPhase::PortsAcquired, false)]
fn can_transition_to_returns_expected(
    #[case] from: SessionPhase,
    #[case] to: SessionPhase,
    #[case] expected: bool,
) {
    assert_eq!(from.can_transition_to(to), expected);
}

#[rstest]
#[case(SessionPhase::Disconnected)]
#[case(SessionPhase::Connected)]
#[case(SessionPhase::PortsAcquired)]
fn phase_round_trips_through_its_name(#[case] phase: SessionPhase) {
    assert_eq!(SessionPhase::try_from(phase.as_str()), Ok(phase));
}

#[test]
fn unknown_phase_name_is_rejected() {
    assert!(SessionPhase::try_from("half_open").is_err());
}

#[rstest]
#[case(
    SessionDomainError::AlreadyConnected { phase: SessionPhase::Connected },
    ErrorKind::AlreadyConnected
)]
#[case(SessionDomainError::NotConnected, ErrorKind::NotConnected)]
#[case(
    SessionDomainError::InvalidPhaseTransition {
        from: SessionPhase::Disconnected,
        to: SessionPhase::PortsAcquired,
    },
    ErrorKind::InvalidArgument
)]
fn lifecycle_errors_report_their_own_kind(
    #[case] error: SessionDomainError,
    #[case] kind: ErrorKind,
) {
    assert_eq!(error.kind(), kind);
}

#[test]
fn already_connected_names_the_live_phase() {
    let error = SessionDomainError::AlreadyConnected {
        phase: SessionPhase::PortsAcquired,
    };
    assert_eq!(
        error.to_string(),
        format!("a generator session is already live ({})", SessionPhase::PortsAcquired)
    );
}

#[rstest]
#[case("config", InterfaceMode::Config)]
#[case("modify", InterfaceMode::Modify)]
#[case("destroy", InterfaceMode::Destroy)]
fn interface_modes_parse(#[case] input: &str, #[case] expected: InterfaceMode) {
    assert_eq!(InterfaceMode::try_from(input), Ok(expected));
}

#[rstest]
#[case("invalid")]
#[case("Config")]
#[case("")]
fn unknown_interface_modes_are_invalid_arguments(#[case] input: &str) {
    let error = InterfaceMode::try_from(input).expect_err("mode should be rejected");
    assert_eq!(error.kind(), ErrorKind::InvalidArgument);
}

#[rstest]
#[case("", "tester", SessionDomainError::EmptyDevice)]
#[case("trex-a", "  ", SessionDomainError::EmptyUsername)]
fn blank_endpoint_fields_are_rejected(
    #[case] device: &str,
    #[case] username: &str,
    #[case] expected: SessionDomainError,
) {
    assert_eq!(SessionEndpoint::new(device, 5050, username), Err(expected));
}

#[test]
fn endpoint_displays_as_user_at_device() {
    let endpoint = SessionEndpoint::new(" trex-a ", 4501, "tester").expect("valid endpoint");
    assert_eq!(endpoint.to_string(), "tester@trex-a:4501");
}
