//! Scripted sessions through the line-oriented shell.

use insta::assert_snapshot;

use yacs::Session;
use yacs_types::TermId;

use crate::common::transcript;

#[test]
fn memory_session_transcript() {
    let mut session = Session::in_memory(Some(TermId::from("F24")));
    let t = transcript(
        &mut session,
        "\
toggle L1 S1
add L1 S2 interested
interest L1 S2
toggle L1 S2
pairs
toggle-listing L1 S1 S2
sections
listings
remove L1 S1
term S25
add L9 S9
pairs
selected L9 S9 --term F24
clear --term F24
interest L1 S1 --term F24
quit
toggle L1 S1
",
    );

    assert_snapshot!(t.stdout, @r"
    selected
    event F24 mutation
    added
    event F24 mutation
    interested
    interested
    event F24 mutation
    S1@L1
    L1 interested
    event F24 mutation
    S1 S2
    L1
    demoted
    event F24 mutation
    term S25
    event S25 active-term-changed
    added
    event S25 mutation
    S9@L9
    false
    ok
    event F24 mutation
    none
    ");
    assert!(t.stderr.is_empty());
}

#[test]
fn bad_lines_are_reported_and_skipped() {
    let mut session = Session::in_memory(Some(TermId::from("F24")));
    let t = transcript(
        &mut session,
        "\
# comment

frobnicate
toggle L1
add L1 S1 maybe
clear now
pairs --term
toggle L1 S1
",
    );

    assert_snapshot!(t.stderr, @r"
    error: unknown command 'frobnicate'
    error: 'toggle' needs a section id
    error: unknown interest level 'maybe' (expected 'selected' or 'interested')
    error: unexpected argument 'now'
    error: --term needs a value
    ");
    assert_snapshot!(t.stdout, @r"
    selected
    event F24 mutation
    ");
}

#[test]
fn nothing_sticks_before_a_term_is_chosen() {
    let mut session = Session::in_memory(None);
    let t = transcript(
        &mut session,
        "\
toggle L1 S1
term F24
selected L1 S1
",
    );

    assert_snapshot!(t.stdout, @r"
    none
    term F24
    event F24 active-term-changed
    false
    ");
}

#[test]
fn document_session_transcript() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = Session::document(dir.path());
    let t = transcript(
        &mut session,
        "\
toggle L2 S3
add L2 S1
sections
toggle-listing L2 S1 S3
selected L2 S1
pairs
add L1 S1 interested
toggle L1 S1 --term F24
",
    );

    assert_snapshot!(t.stdout, @r"
    true
    event selections
    added
    S1 S3
    L2 false
    event selections
    false
    ");
    assert_snapshot!(t.stderr, @r"
    error: 'pairs' is not available with document storage
    error: 'add interested' is not available with document storage
    error: '--term' is not available with document storage
    ");
}

#[test]
fn document_selections_survive_a_new_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    transcript(&mut Session::document(dir.path()), "toggle-listing L4 S7 S8\n");

    let t = transcript(&mut Session::document(dir.path()), "listings\nsections\n");

    assert_snapshot!(t.stdout, @r"
    L4
    S7 S8
    ");
}
