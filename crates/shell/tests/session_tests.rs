//! Scripted console sessions.

use std::io::Cursor;
use std::sync::{
    Arc, Mutex,
    mpsc::{self, Receiver, Sender},
};

use minimax_engine::MinimaxEngine;
use pawn_core::{
    Difficulty, Engine, EngineResult, Position, Role, SearchLimits, SearchResult, Side,
};
use pawnchess::{Event, Flow, Shell, ShellConfig, commands::console_coords};

fn shell() -> Shell<Vec<u8>> {
    Shell::new(&ShellConfig::default(), Vec::new())
}

fn run<E: Engine + Clone + 'static>(shell: &mut Shell<Vec<u8>, E>, script: &str) -> String {
    shell.run(Cursor::new(script.to_owned())).unwrap();
    take_output(shell)
}

fn take_output<E>(shell: &mut Shell<Vec<u8>, E>) -> String
where
    E: Engine + Clone + 'static,
{
    let out = std::mem::take(shell.output_mut());
    String::from_utf8(out).unwrap()
}

/// Depth-one minimax that waits for a signal before it searches.
#[derive(Clone)]
struct Gated {
    gate: Arc<Mutex<Receiver<()>>>,
}

impl Engine for Gated {
    fn search(&mut self, pos: &Position, _limits: SearchLimits) -> EngineResult<SearchResult> {
        let _ = self.gate.lock().unwrap().recv();
        let limits = SearchLimits::depth(Difficulty::new(1).unwrap());
        MinimaxEngine::new().search(pos, limits)
    }

    fn name(&self) -> &str {
        "gated"
    }
}

fn gated_shell() -> (Shell<Vec<u8>, Gated>, Sender<()>) {
    let (release, gate) = mpsc::channel();
    let engine = Gated {
        gate: Arc::new(Mutex::new(gate)),
    };
    (Shell::with_engine(&ShellConfig::default(), engine, Vec::new()), release)
}

#[test]
fn commands_need_a_game() {
    let mut sh = shell();
    let out = run(&mut sh, "print\nmove 1 1 1 2\nlevel 2\nswitch\nundo\n");
    assert!(out.contains("Error! No match to print!"));
    assert_eq!(out.matches("Error! Start a game first!").count(), 4);
}

#[test]
fn empty_and_unknown_input() {
    let mut sh = shell();
    let out = run(&mut sh, "\nfoo\n");
    assert!(out.contains("Error! Empty command"));
    assert!(out.contains("Error! Unknown command."));
}

#[test]
fn human_move_gets_a_machine_reply() {
    let mut sh = shell();
    let out = run(&mut sh, "new\nmove 4 1 4 3\n");
    assert!(out.contains("New game started. You are white."));
    assert_eq!(out.matches("Machine moves").count(), 1);

    let game = sh.game().unwrap();
    assert_eq!(game.position().role_to_act(), Role::Human);
    assert!(game.can_undo());
}

#[test]
fn illegal_moves_are_reported() {
    let mut sh = shell();
    let out = run(&mut sh, "new\nmove 1 1 2 2\nmove 1 1 1 5\nmove x 1 1 2\nmove 1 1\n");
    assert_eq!(out.matches("Error! Illegal move or coordinates!").count(), 3);
    assert!(out.contains("Error! Coordinates not given!"));
    assert!(!sh.game().unwrap().can_undo());
}

#[test]
fn undo_restores_the_opening() {
    let mut sh = shell();
    run(&mut sh, "new\n");
    let opening = *sh.game().unwrap().position();

    let out = run(&mut sh, "move 2 1 2 2\nundo\nundo\n");
    assert_eq!(*sh.game().unwrap().position(), opening);
    assert!(out.contains("Error! Nothing to undo!"));
    assert!(out.contains("8 BBBBBBBB"));
}

#[test]
fn machine_reply_arrives_as_an_event() {
    let (mut sh, release) = gated_shell();
    sh.execute_line("new").unwrap();
    sh.execute_line("move 4 1 4 3").unwrap();
    assert!(sh.is_thinking());

    // Commands are still served while the machine thinks
    sh.execute_line("move 1 1 1 2").unwrap();
    sh.execute_line("print").unwrap();
    let out = take_output(&mut sh);
    assert!(out.contains("Error! Not your turn!"));
    assert!(out.contains("White: 8  Black: 8"));

    release.send(()).unwrap();
    let event = sh.next_event().unwrap();
    assert!(matches!(event, Event::Reply(_)));
    assert_eq!(sh.handle(event).unwrap(), Flow::Continue);
    assert!(!sh.is_thinking());
    assert!(take_output(&mut sh).contains("Machine moves"));
    assert_eq!(sh.game().unwrap().position().role_to_act(), Role::Human);
}

#[test]
fn new_game_during_search_drops_the_late_reply() {
    let (mut sh, release) = gated_shell();
    sh.execute_line("new").unwrap();
    sh.execute_line("move 4 1 4 3").unwrap();
    assert!(sh.is_thinking());

    sh.execute_line("new").unwrap();
    assert!(!sh.is_thinking());
    let fresh = *sh.game().unwrap().position();
    take_output(&mut sh);

    release.send(()).unwrap();
    let event = sh.next_event().unwrap();
    assert_eq!(sh.handle(event).unwrap(), Flow::Continue);
    assert_eq!(*sh.game().unwrap().position(), fresh);
    assert!(!take_output(&mut sh).contains("Machine moves"));
}

#[test]
fn undo_during_search_drops_the_late_reply() {
    let (mut sh, release) = gated_shell();
    sh.execute_line("new").unwrap();
    let opening = *sh.game().unwrap().position();
    sh.execute_line("move 4 1 4 3").unwrap();

    sh.execute_line("undo").unwrap();
    assert!(!sh.is_thinking());
    release.send(()).unwrap();
    let event = sh.next_event().unwrap();
    sh.handle(event).unwrap();
    assert_eq!(*sh.game().unwrap().position(), opening);
    assert!(!sh.game().unwrap().can_undo());
}

#[test]
fn quit_does_not_wait_for_the_machine() {
    // The gate is never opened, so the search never finishes
    let (mut sh, _release) = gated_shell();
    let out = run(&mut sh, "new\nmove 4 1 4 3\nquit\n");
    assert!(!out.contains("Machine moves"));
    assert!(sh.is_thinking());
}

#[test]
fn switch_lets_the_machine_open() {
    let mut sh = shell();
    let out = run(&mut sh, "new\nswitch\n");
    assert!(out.contains("New game started. You are black."));
    assert_eq!(out.matches("Machine moves").count(), 1);

    let pos = *sh.game().unwrap().position();
    assert_eq!(pos.human_side(), Side::Black);
    assert_eq!(pos.role_to_act(), Role::Human);
}

#[test]
fn switch_leaves_new_game_settings_alone() {
    let mut sh = shell();
    let out = run(&mut sh, "new\nswitch\nswitch\n");
    assert_eq!(out.matches("You are white.").count(), 2);
    assert_eq!(out.matches("You are black.").count(), 1);
    assert_eq!(sh.game().unwrap().position().human_side(), Side::White);

    run(&mut sh, "switch\nnew\n");
    let pos = *sh.game().unwrap().position();
    assert_eq!(pos.human_side(), Side::White);
    assert_eq!(pos.role_to_act(), Role::Human);
}

#[test]
fn level_changes_apply_to_current_game() {
    let mut sh = shell();
    let out = run(&mut sh, "new\nlevel 9\nlevel 1\n");
    assert!(out.contains("Error! AI not tuned yet! Choose a lower difficulty"));
    assert_eq!(sh.game().unwrap().difficulty().depth(), 1);

    // New games keep the chosen level
    run(&mut sh, "new\n");
    assert_eq!(sh.game().unwrap().difficulty().depth(), 1);
}

#[test]
fn quit_stops_reading() {
    let mut sh = shell();
    let out = run(&mut sh, "quit\nnew\n");
    assert!(!out.contains("New game"));
    assert_eq!(sh.execute_line("q").unwrap(), Flow::Quit);
}

#[test]
fn print_shows_labelled_board() {
    let mut sh = shell();
    let out = run(&mut sh, "new\nprint\n");
    assert!(out.contains("8 BBBBBBBB\n"));
    assert!(out.contains("1 WWWWWWWW\n"));
    assert!(out.contains("  12345678\n"));
    assert!(out.contains("White: 8  Black: 8  Level: 3"));
}

#[test]
fn machine_starter_from_config() {
    let config = ShellConfig {
        starter: Role::Machine,
        ..ShellConfig::default()
    };
    let mut sh = Shell::new(&config, Vec::new());
    let out = run(&mut sh, "new\n");
    assert!(out.contains("You are white."));
    assert_eq!(out.matches("Machine moves").count(), 1);
}

#[test]
fn full_game_ends_with_a_verdict() {
    let mut sh = shell();
    run(&mut sh, "new\nlevel 1\n");

    let mut transcript = String::new();
    for _ in 0..200 {
        let game = sh.game().unwrap();
        if game.is_terminal() {
            break;
        }
        let (from, to) = game
            .legal_moves()
            .into_iter()
            .find_map(|p| p.targets.last().map(|&to| (p.from, to)))
            .unwrap();
        let (fc, fr) = console_coords(from);
        let (tc, tr) = console_coords(to);
        transcript.push_str(&run(&mut sh, &format!("move {fc} {fr} {tc} {tr}\n")));
    }

    assert!(sh.game().unwrap().is_terminal());
    let verdicts = ["Congratulations! You won.", "Sorry! Machine wins.", "Nobody wins. Draw."];
    assert_eq!(
        verdicts.iter().map(|v| transcript.matches(v).count()).sum::<usize>(),
        1
    );
    assert!(run(&mut sh, "move 1 1 1 2\n").contains("Error! Game already over!"));
}
