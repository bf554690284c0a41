use std::net::SocketAddr;
use std::sync::Arc;

use super::*;
use crate::candidate::CandidateTransport;
use crate::relay::TurnServer;

const LOCAL_IPS: [&str; 2] = ["10.0.0.1", "10.0.0.2"];

fn candidate(kind: CandidateKind, transport: CandidateTransport) -> Result<Candidate> {
    let mut c = Candidate::new(kind);
    c.transport = transport;
    c.base_addr = "10.0.0.1:5000".parse()?;
    c.addr = if c.candidate_type() == CandidateType::Host {
        c.base_addr
    } else {
        "203.0.113.7:61000".parse()?
    };
    Ok(c)
}

fn relay_kind(relay_type: RelayType, preference: u8) -> Result<CandidateKind> {
    let server: SocketAddr = "192.0.2.10:3478".parse()?;
    let turn = TurnServer::new(server, relay_type, preference, String::new(), String::new())?;
    Ok(CandidateKind::Relayed(Arc::new(turn)))
}

fn priority(c: &Candidate, reliable: bool, nat_assisted: bool) -> Result<u32> {
    ice_priority(c, reliable, nat_assisted, &LOCAL_IPS)
}

#[test]
fn test_ice_priority_full() -> Result<()> {
    let tests = vec![
        ((TYPE_PREF_HOST, 0xffff, 1), 0x78ff_ffff),
        ((126, 0xffff, 1), 0x7eff_ffff),
        ((0, 0, 255), 1),
        ((TYPE_PREF_RELAYED, 8192, 2), 20 * (1 << 24) + 8192 * (1 << 8) + 254),
    ];

    for ((type_pref, local_pref, component), expected) in tests {
        let component = NonZeroU8::new(component).ok_or(Error::ErrInvalidComponentId(0))?;
        assert_eq!(
            ice_priority_full(TypePreference::new(type_pref)?, local_pref, component),
            expected
        );
    }

    assert_eq!(
        TypePreference::new(127),
        Err(Error::ErrTypePreferenceOutOfRange(127))
    );

    Ok(())
}

#[test]
fn test_ice_priority_values() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let tests = vec![
        (
            candidate(CandidateKind::Host, CandidateTransport::Udp)?,
            120 * (1 << 24) + (1 << 13) * (1 << 8) + 255,
        ),
        (
            candidate(CandidateKind::PeerReflexive, CandidateTransport::Udp)?,
            110 * (1 << 24) + (1 << 13) * (1 << 8) + 255,
        ),
        (
            candidate(CandidateKind::ServerReflexive, CandidateTransport::Udp)?,
            100 * (1 << 24) + (1 << 13) * (1 << 8) + 255,
        ),
        (
            candidate(relay_kind(RelayType::TurnUdp, 2)?, CandidateTransport::Udp)?,
            30 * (1 << 24) + ((1 << 13) + (2 << 6)) * (1 << 8) + 255,
        ),
        (
            candidate(relay_kind(RelayType::TurnTls, 0)?, CandidateTransport::Udp)?,
            20 * (1 << 24) + (1 << 13) * (1 << 8) + 255,
        ),
        (
            // unreliable stream over TCP: 120 / 2, direction 4
            candidate(CandidateKind::Host, CandidateTransport::TcpActive)?,
            60 * (1 << 24) + (4 << 13) * (1 << 8) + 255,
        ),
    ];

    for (c, expected) in tests {
        assert_eq!(priority(&c, false, false)?, expected, "{c}");
    }

    Ok(())
}

#[test]
fn test_ice_priority_type_tiers() -> Result<()> {
    let host = priority(&candidate(CandidateKind::Host, CandidateTransport::Udp)?, false, false)?;
    let prflx = priority(
        &candidate(CandidateKind::PeerReflexive, CandidateTransport::Udp)?,
        false,
        false,
    )?;
    let srflx = priority(
        &candidate(CandidateKind::ServerReflexive, CandidateTransport::Udp)?,
        false,
        false,
    )?;
    let relay_udp = priority(
        &candidate(relay_kind(RelayType::TurnUdp, 0)?, CandidateTransport::Udp)?,
        false,
        false,
    )?;
    let relay_tcp = priority(
        &candidate(relay_kind(RelayType::TurnTcp, 0)?, CandidateTransport::Udp)?,
        false,
        false,
    )?;

    assert!(host > prflx);
    assert!(prflx > srflx);
    assert!(srflx > relay_udp);
    assert!(relay_udp > relay_tcp);

    Ok(())
}

#[test]
fn test_ice_priority_nat_assisted() -> Result<()> {
    let srflx = candidate(CandidateKind::ServerReflexive, CandidateTransport::Udp)?;
    let prflx = candidate(CandidateKind::PeerReflexive, CandidateTransport::Udp)?;

    let assisted = priority(&srflx, false, true)?;
    assert!(assisted > priority(&srflx, false, false)?);
    assert!(assisted < priority(&prflx, false, true)?);
    assert_eq!(
        type_preference(&srflx, false, true).value(),
        TYPE_PREF_NAT_ASSISTED
    );

    // only server reflexive candidates are affected
    let host = candidate(CandidateKind::Host, CandidateTransport::Udp)?;
    assert_eq!(priority(&host, false, true)?, priority(&host, false, false)?);

    Ok(())
}

#[test]
fn test_ice_priority_reliability_mismatch() -> Result<()> {
    let udp = candidate(CandidateKind::Host, CandidateTransport::Udp)?;
    assert!(priority(&udp, true, false)? < priority(&udp, false, false)?);
    assert_eq!(type_preference(&udp, true, false).value(), TYPE_PREF_HOST / 2);

    for transport in [
        CandidateTransport::TcpActive,
        CandidateTransport::TcpPassive,
        CandidateTransport::TcpSimultaneousOpen,
    ] {
        let tcp = candidate(CandidateKind::Host, transport)?;
        assert!(priority(&tcp, false, false)? < priority(&tcp, true, false)?);
    }

    let relay = candidate(relay_kind(RelayType::TurnUdp, 0)?, CandidateTransport::TcpPassive)?;
    assert_eq!(
        type_preference(&relay, false, false).value(),
        TYPE_PREF_RELAYED_UDP / 2
    );

    Ok(())
}

#[test]
fn test_ice_priority_component_tie_break() -> Result<()> {
    let rtp = candidate(CandidateKind::Host, CandidateTransport::Udp)?;
    let mut rtcp = rtp.clone();
    rtcp.component_id = crate::candidate::COMPONENT_RTCP;

    let rtp_priority = priority(&rtp, false, false)?;
    let rtcp_priority = priority(&rtcp, false, false)?;
    assert!(rtp_priority > rtcp_priority);
    assert_eq!(rtp_priority - rtcp_priority, 1);

    Ok(())
}

#[test]
fn test_ice_priority_local_address_rank() -> Result<()> {
    let first = candidate(CandidateKind::Host, CandidateTransport::Udp)?;
    let mut second = first.clone();
    second.addr = "10.0.0.2:5000".parse()?;
    second.base_addr = second.addr;

    // the address rank lands in the low bits of the local preference as is,
    // so a later entry in the address list packs a larger value
    let first_priority = priority(&first, false, false)?;
    let second_priority = priority(&second, false, false)?;
    assert!(second_priority > first_priority);
    assert_eq!(second_priority - first_priority, 1 << 8);

    Ok(())
}

#[test]
fn test_ice_priority_relay_preference() -> Result<()> {
    let a = candidate(relay_kind(RelayType::TurnUdp, 0)?, CandidateTransport::Udp)?;
    let b = candidate(relay_kind(RelayType::TurnUdp, 1)?, CandidateTransport::Udp)?;
    assert_ne!(priority(&a, false, false)?, priority(&b, false, false)?);

    // descriptors built without validation are still rejected when packing
    let server: SocketAddr = "192.0.2.10:3478".parse()?;
    let rogue = Arc::new(TurnServer {
        server,
        relay_type: RelayType::TurnUdp,
        preference: 9,
        username: String::new(),
        password: String::new(),
    });
    let c = candidate(CandidateKind::Relayed(rogue), CandidateTransport::Udp)?;
    assert_eq!(
        priority(&c, false, false),
        Err(Error::ErrTurnPreferenceOutOfRange(9))
    );

    assert_eq!(
        TurnServer::new(server, RelayType::TurnUdp, 8, String::new(), String::new()),
        Err(Error::ErrTurnPreferenceOutOfRange(8))
    );

    Ok(())
}

#[test]
fn test_ice_priority_on_copy() -> Result<()> {
    let relay = candidate(relay_kind(RelayType::TurnTcp, 3)?, CandidateTransport::Udp)?;
    let copy = relay.clone();
    drop(relay);

    assert_eq!(
        priority(&copy, false, false)?,
        20 * (1 << 24) + ((1 << 13) + (3 << 6)) * (1 << 8) + 255
    );

    Ok(())
}

#[test]
fn test_ms_ice_priority_values() -> Result<()> {
    let tests = vec![
        (
            candidate(CandidateKind::Host, CandidateTransport::Udp)?,
            false,
            120 * (1 << 24) + (15 << 12) * (1 << 8) + 255,
        ),
        (
            candidate(CandidateKind::Host, CandidateTransport::TcpActive)?,
            true,
            120 * (1 << 24) + ((6 << 12) + (5 << 9)) * (1 << 8) + 255,
        ),
        (
            candidate(CandidateKind::Host, CandidateTransport::TcpPassive)?,
            true,
            120 * (1 << 24) + ((6 << 12) + (2 << 9)) * (1 << 8) + 255,
        ),
        (
            candidate(relay_kind(RelayType::TurnUdp, 4)?, CandidateTransport::Udp)?,
            false,
            30 * (1 << 24) + ((15 << 12) + (4 << 6)) * (1 << 8) + 255,
        ),
    ];

    for (c, reliable, expected) in tests {
        assert_eq!(
            ms_ice_priority(&c, reliable, false, &LOCAL_IPS)?,
            expected,
            "{c}"
        );
    }

    Ok(())
}

#[test]
fn test_legacy_priorities() -> Result<()> {
    let tests = vec![
        (CandidateKind::Host, 1000, 830),
        (CandidateKind::ServerReflexive, 900, 550),
        (CandidateKind::PeerReflexive, 900, 550),
        (relay_kind(RelayType::TurnUdp, 0)?, 500, 450),
    ];

    for (kind, jingle, msn) in tests {
        let c = Candidate::new(kind);
        assert_eq!(jingle_priority(&c), jingle, "{c}");
        assert_eq!(msn_priority(&c), msn, "{c}");
    }

    Ok(())
}

#[test]
fn test_priority_engine_dispatch() -> Result<()> {
    let host = candidate(CandidateKind::Host, CandidateTransport::Udp)?;

    let tests = vec![
        (Compatibility::Rfc5245, priority(&host, false, false)?),
        (
            Compatibility::Oc2007R2,
            ms_ice_priority(&host, false, false, &LOCAL_IPS)?,
        ),
        (Compatibility::Google, 1000),
        (Compatibility::Msn, 830),
    ];

    for (compatibility, expected) in tests {
        let engine = PriorityEngine::new(
            PriorityConfig {
                compatibility,
                ..Default::default()
            },
            LOCAL_IPS,
        );
        assert_eq!(engine.priority(&host)?, expected, "{compatibility:?}");
    }

    Ok(())
}

#[test]
fn test_priority_engine_sort_candidates() -> Result<()> {
    let engine = PriorityEngine::new(PriorityConfig::default(), LOCAL_IPS);

    let candidates = vec![
        candidate(relay_kind(RelayType::TurnUdp, 0)?, CandidateTransport::Udp)?,
        candidate(CandidateKind::ServerReflexive, CandidateTransport::Udp)?,
        candidate(CandidateKind::Host, CandidateTransport::Udp)?,
        candidate(CandidateKind::PeerReflexive, CandidateTransport::Udp)?,
    ];

    let sorted: Vec<CandidateType> = engine
        .sort_candidates(candidates)?
        .iter()
        .map(Candidate::candidate_type)
        .collect();
    assert_eq!(
        sorted,
        vec![
            CandidateType::Host,
            CandidateType::PeerReflexive,
            CandidateType::ServerReflexive,
            CandidateType::Relayed,
        ]
    );

    Ok(())
}

#[test]
fn test_priority_config_serde() {
    let config: Option<PriorityConfig> =
        serde_json::from_str(r#"{"compatibility":"oc2007r2","reliable":true}"#).ok();
    assert_eq!(
        config,
        Some(PriorityConfig {
            compatibility: Compatibility::Oc2007R2,
            reliable: true,
            nat_assisted: false,
        })
    );

    let config: Option<PriorityConfig> = serde_json::from_str("{}").ok();
    assert_eq!(config, Some(PriorityConfig::default()));
}
