//! The interactive session: one game, one engine, one output stream.
//!
//! Input lines and finished searches arrive on the same channel as
//! [`Event`]s. Searches run on worker threads against a snapshot of the
//! game, so `new`, `undo` and `quit` are handled while the machine thinks;
//! a reply for a game that has moved on is dropped.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::{debug, info, warn};

use minimax_engine::MinimaxEngine;
use pawn_core::{
    Accepted, Engine, EngineError, Game, GameConfig, IllegalMove, MachineReply, Move, PlyReport,
    Role, SIZE, Side,
};

use crate::commands::{Command, console_coords, parse_command};
use crate::config::ShellConfig;

pub const PROMPT: &str = "pc> ";

/// Whether the read loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Something the session has to react to.
#[derive(Debug)]
pub enum Event {
    Line(String),
    InputClosed,
    Reply(MachineReply),
}

pub struct Shell<W: Write, E = MinimaxEngine> {
    /// Settings `new` starts from
    config: GameConfig,
    /// Settings of the running game, which `switch` flips
    current: GameConfig,
    engine: E,
    game: Option<Game>,
    out: W,
    events: Sender<Event>,
    inbox: Receiver<Event>,
    /// A search for the current game is running
    thinking: bool,
    input_closed: bool,
}

impl<W: Write> Shell<W> {
    pub fn new(config: &ShellConfig, out: W) -> Self {
        let engine = MinimaxEngine::with_tie_break(config.search.root_tie_break);
        Self::with_engine(config, engine, out)
    }
}

impl<W: Write, E: Engine + Clone + 'static> Shell<W, E> {
    pub fn with_engine(config: &ShellConfig, engine: E, out: W) -> Self {
        let (events, inbox) = mpsc::channel();
        let game_config = config.game_config();
        Self {
            config: game_config,
            current: game_config,
            engine,
            game: None,
            out,
            events,
            inbox,
            thinking: false,
            input_closed: false,
        }
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Whether a machine search for the current game is outstanding.
    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    /// Reads commands until `quit`, or until input ends and the machine has
    /// answered the last move.
    pub fn run<R: BufRead + Send + 'static>(&mut self, input: R) -> io::Result<()> {
        // Fresh channel so lines left over from an earlier run are ignored
        let (events, inbox) = mpsc::channel();
        self.events = events;
        self.inbox = inbox;
        self.input_closed = false;
        if self.thinking {
            self.dispatch_search()?;
        }

        let lines = self.events.clone();
        thread::spawn(move || {
            for line in input.lines() {
                match line {
                    Ok(line) => {
                        if lines.send(Event::Line(line)).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "stopped reading input");
                        break;
                    }
                }
            }
            let _ = lines.send(Event::InputClosed);
        });

        self.prompt()?;
        while let Some(event) = self.next_event() {
            let typed = matches!(event, Event::Line(_));
            if self.handle(event)? == Flow::Quit {
                break;
            }
            if typed {
                self.prompt()?;
            }
        }
        Ok(())
    }

    /// Blocks until the next line or search reply arrives.
    pub fn next_event(&self) -> Option<Event> {
        self.inbox.recv().ok()
    }

    pub fn handle(&mut self, event: Event) -> io::Result<Flow> {
        match event {
            Event::Line(line) => return self.execute_line(&line),
            Event::InputClosed => self.input_closed = true,
            Event::Reply(reply) => self.machine_reply(reply)?,
        }
        if self.input_closed && !self.thinking {
            return Ok(Flow::Quit);
        }
        Ok(Flow::Continue)
    }

    pub fn execute_line(&mut self, line: &str) -> io::Result<Flow> {
        match parse_command(line) {
            Ok(command) => self.execute(command),
            Err(e) => {
                self.error(&e.to_string())?;
                Ok(Flow::Continue)
            }
        }
    }

    pub fn execute(&mut self, command: Command) -> io::Result<Flow> {
        debug!(?command, "executing");
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::New => self.new_game(self.config)?,
            Command::Switch => match self.game {
                Some(_) => self.new_game(self.current.switched())?,
                None => self.error("Start a game first!")?,
            },
            Command::Level(difficulty) => match self.game.as_mut() {
                Some(game) => {
                    game.set_difficulty(difficulty);
                    self.config.difficulty = difficulty;
                    self.current.difficulty = difficulty;
                }
                None => self.error("Start a game first!")?,
            },
            Command::Move(mv) => self.human_move(mv)?,
            Command::Print => self.print_board()?,
            Command::Undo => match self.game.as_mut().map(Game::undo) {
                Some(true) => {
                    self.thinking = false;
                    self.print_board()?
                }
                Some(false) => self.error("Nothing to undo!")?,
                None => self.error("Start a game first!")?,
            },
            Command::Help => self.help()?,
        }
        Ok(Flow::Continue)
    }

    fn new_game(&mut self, config: GameConfig) -> io::Result<()> {
        self.current = config;
        self.thinking = false;
        match self.game.as_mut() {
            Some(game) => game.restart(config),
            None => self.game = Some(Game::new(config)),
        }
        writeln!(
            self.out,
            "New game started. You are {}.",
            config.human.name()
        )?;
        if config.starting_role() == Role::Machine {
            self.dispatch_search()?;
        }
        Ok(())
    }

    fn human_move(&mut self, mv: Move) -> io::Result<()> {
        let Some(game) = self.game.as_mut() else {
            return self.error("Start a game first!");
        };
        let ply = match game.play_human(mv) {
            Ok(ply) => ply,
            Err(e) => {
                debug!(%mv, error = %e, "move refused");
                return self.error(describe(&e));
            }
        };
        if ply.outcome.is_terminal() {
            return self.announce_result();
        }
        if ply.opponent_skipped {
            writeln!(self.out, "Machine has to skip its turn!")?;
            return Ok(());
        }
        self.dispatch_search()
    }

    /// Hands a snapshot of the game to a worker thread.
    fn dispatch_search(&mut self) -> io::Result<()> {
        let Some(game) = self.game.as_ref() else {
            return Ok(());
        };
        let request = match game.request_machine_move() {
            Ok(request) => request,
            Err(e) => return self.error(describe(&e)),
        };
        let mut engine = self.engine.clone();
        let events = self.events.clone();
        self.thinking = true;
        debug!(depth = request.difficulty.depth(), "search dispatched");
        thread::spawn(move || {
            let reply = request.run(&mut engine);
            // The session is gone once the receiver is dropped
            let _ = events.send(Event::Reply(reply));
        });
        Ok(())
    }

    fn machine_reply(&mut self, reply: MachineReply) -> io::Result<()> {
        let Some(game) = self.game.as_mut() else {
            return Ok(());
        };
        let ply = match game.accept(reply) {
            Ok(Accepted::Applied(ply)) => ply,
            Ok(Accepted::Stale) => return Ok(()),
            Err(e) => {
                self.thinking = false;
                return self.error(describe(&e));
            }
        };
        self.thinking = false;
        self.report_machine_ply(&ply)?;
        if ply.outcome.is_terminal() {
            return self.announce_result();
        }
        if ply.opponent_skipped {
            return self.dispatch_search();
        }
        Ok(())
    }

    fn report_machine_ply(&mut self, ply: &PlyReport) -> io::Result<()> {
        let (fc, fr) = console_coords(ply.mv.from);
        let (tc, tr) = console_coords(ply.mv.to);
        info!(mv = %ply.mv, score = ?ply.score, "machine moved");
        writeln!(self.out, "Machine moves {fc} {fr} {tc} {tr}.")?;
        if ply.opponent_skipped {
            writeln!(self.out, "You have to skip!")?;
        }
        Ok(())
    }

    fn announce_result(&mut self) -> io::Result<()> {
        let Some(game) = self.game.as_ref() else {
            return Ok(());
        };
        let human = game.position().human_side();
        let message = match game.winner() {
            None => "Nobody wins. Draw.",
            Some(side) if side == human => "Congratulations! You won.",
            Some(_) => "Sorry! Machine wins.",
        };
        writeln!(self.out, "{message}")
    }

    fn print_board(&mut self) -> io::Result<()> {
        let Some(game) = self.game.as_ref() else {
            return self.error("No match to print!");
        };
        let text = render(game);
        write!(self.out, "{text}")
    }

    fn help(&mut self) -> io::Result<()> {
        writeln!(self.out, "Available commands:")?;
        writeln!(self.out, "-Create a new game: NEW")?;
        writeln!(self.out, "-Change the difficulty: LEVEL <lvl>")?;
        writeln!(self.out, "-Move a pawn: MOVE <fromCol> <fromRow> <toCol> <toRow>")?;
        writeln!(self.out, "-Printing the current board: PRINT")?;
        writeln!(self.out, "-Switch colors and start new: SWITCH")?;
        writeln!(self.out, "-Take back your last move: UNDO")?;
        writeln!(self.out, "-Exit the game: QUIT")
    }

    fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{PROMPT}")?;
        self.out.flush()
    }

    fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "Error! {message}")
    }
}

/// User-facing text for a refused operation.
fn describe(err: &EngineError) -> &'static str {
    match err {
        EngineError::GameOver => "Game already over!",
        EngineError::IllegalMove(IllegalMove::OutOfTurn(_)) => "Not your turn!",
        EngineError::IllegalMove(_) => "Illegal move or coordinates!",
    }
}

/// Rows from the machine's home rank down to the human's, labelled with
/// the row numbers the `move` command takes, plus a pawn count.
pub fn render(game: &Game) -> String {
    let pos = game.position();
    let mut out = String::new();
    for (rank, line) in pos.diagram().lines().enumerate() {
        let row = i32::from(SIZE) - rank as i32;
        out.push_str(&format!("{row} {line}\n"));
    }
    out.push_str("  ");
    for col in 1..=SIZE {
        out.push_str(&col.to_string());
    }
    out.push('\n');

    let count = |side: Side| pos.pawn_count(side);
    out.push_str(&format!(
        "White: {}  Black: {}  Level: {}\n",
        count(Side::White),
        count(Side::Black),
        game.difficulty()
    ));
    out
}
