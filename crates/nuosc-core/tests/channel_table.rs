use nuosc_core::{
    channel_index, OscError, ANTI_NU_E, ANTI_NU_MU, ANTI_NU_TAU, NU_E, NU_MU, NU_TAU,
};

#[test]
fn neutrino_block_ground_truth() {
    let table = [
        (NU_E, NU_E, 0),
        (NU_MU, NU_E, 1),
        (NU_TAU, NU_E, 2),
        (NU_E, NU_MU, 3),
        (NU_MU, NU_MU, 4),
        (NU_TAU, NU_MU, 5),
        (NU_E, NU_TAU, 6),
        (NU_MU, NU_TAU, 7),
        (NU_TAU, NU_TAU, 8),
    ];
    for (before, after, expected) in table {
        assert_eq!(
            channel_index(before, after).unwrap(),
            expected,
            "index({before}, {after})"
        );
    }
}

#[test]
fn antineutrino_block_offsets_by_nine() {
    for before in [NU_E, NU_MU, NU_TAU] {
        for after in [NU_E, NU_MU, NU_TAU] {
            let nu = channel_index(before, after).unwrap();
            let antinu = channel_index(-before, -after).unwrap();
            assert_eq!(antinu, nu + 9);
        }
    }
}

#[test]
fn all_indices_land_in_range() {
    let codes = [NU_E, NU_MU, NU_TAU, ANTI_NU_E, ANTI_NU_MU, ANTI_NU_TAU];
    for before in codes {
        for after in codes {
            let idx = channel_index(before, after).unwrap();
            assert!(idx < 18);
        }
    }
}

#[test]
fn block_follows_the_sign_of_before() {
    // Only the before-flavor sign selects the antineutrino block; the
    // after-flavor sign does not participate.
    assert_eq!(
        channel_index(NU_MU, ANTI_NU_E).unwrap(),
        channel_index(NU_MU, NU_E).unwrap()
    );
    assert_eq!(
        channel_index(ANTI_NU_MU, NU_E).unwrap(),
        channel_index(ANTI_NU_MU, ANTI_NU_E).unwrap()
    );
}

#[test]
fn unknown_magnitudes_are_rejected() {
    for (before, after) in [(13, NU_E), (NU_E, 15), (0, NU_E), (NU_E, -18), (11, 17)] {
        let err = channel_index(before, after).unwrap_err();
        match err {
            OscError::UndefinedChannel(info) => {
                assert_eq!(info.code, "undefined-channel");
                assert!(info.context.contains_key("before"));
                assert!(info.context.contains_key("after"));
            }
            other => panic!("expected UndefinedChannel, got {other:?}"),
        }
    }
}
