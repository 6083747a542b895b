use std::{
    fmt, fs,
    io::{self, BufRead, Write},
    path::Path,
    process,
};

use clap::{App, Arg, ArgMatches};
use log::{debug, warn};
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, SeedableRng};
use regex::Regex;

use navalbattle::{
    board::{CellRef, FleetSetup},
    config::DEFAULT_HISTORY_WINDOW,
    ships::{ShipClass, BATTLESHIP, CARRIER, CRUISER, DESTROYER, STANDARD_FLEET, STANDARD_LENGTHS},
    Board, Coordinate, GameConfig, Layout, Match, MatchEvent, Orientation, Outcome,
    PlacementEngine, Side,
};

mod logging;

fn main() -> io::Result<()> {
    let matches = App::new("Battleship")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Two player hot-seat battleship in the terminal.")
        .arg(
            Arg::with_name("size")
                .short("s")
                .long("size")
                .value_name("SIZE")
                .help("width and height of each board")
                .takes_value(true)
                .default_value("10"),
        )
        .arg(
            Arg::with_name("ships")
                .long("ships")
                .value_name("LENGTHS")
                .help("comma separated vessel lengths, e.g. 5,4,3,3,2")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("player1")
                .long("player1")
                .value_name("NAME")
                .help("name of the player attacking first")
                .takes_value(true)
                .default_value("Player 1"),
        )
        .arg(
            Arg::with_name("player2")
                .long("player2")
                .value_name("NAME")
                .help("name of the player attacking second")
                .takes_value(true)
                .default_value("Player 2"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("SEED")
                .help("seed for random placement")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("layout1")
                .long("layout1")
                .value_name("FILE")
                .help("JSON layout file for the first player")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("layout2")
                .long("layout2")
                .value_name("FILE")
                .help("JSON layout file for the second player")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("random")
                .short("r")
                .long("random")
                .help("place every fleet without a layout file at random"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("don't print sound cues"),
        )
        .get_matches();

    logging::init();

    let config = match build_config(&matches) {
        Ok(config) => config,
        Err(msg) => fail(&msg),
    };
    let mut rng = match matches.value_of("seed") {
        Some(seed) => match seed.parse() {
            Ok(seed) => StdRng::seed_from_u64(seed),
            Err(_) => fail(&format!("invalid seed: {}", seed)),
        },
        None => StdRng::from_entropy(),
    };
    let fleet = fleet_for(&config.lengths);
    let names = [
        matches.value_of("player1").unwrap_or("Player 1").to_owned(),
        matches.value_of("player2").unwrap_or("Player 2").to_owned(),
    ];

    let stdin = std::io::stdin();
    let mut input = InputReader::new(stdin.lock());
    let engine = PlacementEngine::new(config.limits);

    let mut layouts = Vec::with_capacity(2);
    for (side, arg) in Side::BOTH.iter().zip(&["layout1", "layout2"]) {
        let name = &names[side_index(*side)];
        let layout = if let Some(path) = matches.value_of(arg) {
            load_layout(Path::new(path), &config)?
        } else if matches.is_present("random") {
            let mut board = Board::new(config.size).unwrap_or_default();
            if let Err(err) = engine.place_randomly(&mut board, &config.lengths, &mut rng) {
                fail(&format!("could not place {}'s fleet: {}", name, err));
            }
            Layout::from_board(&board)
        } else {
            let mut setup = match FleetSetup::new(config.size, fleet.clone()) {
                Ok(setup) => setup,
                Err(err) => fail(&err.to_string()),
            };
            choose_placements(&mut rng, &engine, &mut setup, name, &mut input)?;
            hand_over(name, &mut input)?;
            setup.layout()
        };
        layouts.push(layout);
    }

    let mut game = match Match::from_layouts(
        &config,
        names[0].as_str(),
        &layouts[0],
        names[1].as_str(),
        &layouts[1],
    ) {
        Ok(game) => game,
        Err(err) => fail(&err.to_string()),
    };
    if !matches.is_present("quiet") {
        game.on_event(play_cue);
    }

    play(&mut game, &fleet, &mut input)
}

/// Build the game configuration from the command line.
fn build_config(matches: &ArgMatches) -> Result<GameConfig, String> {
    let size = matches.value_of("size").unwrap_or("10");
    let size = size
        .parse()
        .map_err(|_| format!("invalid board size: {}", size))?;
    let lengths = match matches.value_of("ships") {
        Some(ships) => ships
            .split(',')
            .map(|len| {
                len.trim()
                    .parse()
                    .map_err(|_| format!("invalid vessel length: {}", len))
            })
            .collect::<Result<Vec<usize>, _>>()?,
        None => STANDARD_LENGTHS.to_vec(),
    };
    let config = GameConfig {
        size,
        lengths,
        history_window: DEFAULT_HISTORY_WINDOW,
        ..GameConfig::default()
    };
    config.validate().map_err(|err| err.to_string())?;
    Ok(config)
}

/// Name the vessels of the fleet. The standard lengths get the standard fleet, anything
/// else is named by length.
fn fleet_for(lengths: &[usize]) -> Vec<ShipClass> {
    if lengths == STANDARD_LENGTHS {
        return STANDARD_FLEET.to_vec();
    }
    lengths
        .iter()
        .map(|&length| match length {
            5 => CARRIER,
            4 => BATTLESHIP,
            3 => CRUISER,
            2 => DESTROYER,
            other => ShipClass::new("Patrol", other),
        })
        .collect()
}

/// Read and check a layout file.
fn load_layout(path: &Path, config: &GameConfig) -> io::Result<Layout> {
    let text = fs::read_to_string(path)?;
    let layout: Layout = serde_json::from_str(&text)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    if let Err(err) = layout.validate(config.size, &config.lengths) {
        fail(&format!("{}: {}", path.display(), err));
    }
    debug!("loaded layout from {}", path.display());
    Ok(layout)
}

/// Print an error and exit.
fn fail(msg: &str) -> ! {
    eprintln!("error: {}", msg);
    process::exit(2)
}

fn side_index(side: Side) -> usize {
    match side {
        Side::First => 0,
        Side::Second => 1,
    }
}

/// Choose placements for all ships using input from the player.
fn choose_placements(
    rng: &mut StdRng,
    engine: &PlacementEngine,
    setup: &mut FleetSetup,
    name: &str,
    input: &mut InputReader<impl BufRead>,
) -> io::Result<()> {
    enum Command {
        Done,
        Place(Coordinate, Option<Orientation>),
        Preview(Coordinate),
        Rotate,
        Undo,
        Clear,
        Randomize,
        Help,
    }
    /// Matcher for a placement, with or without the `place` keyword.
    static PLACE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"^(?x)(?:(?:place|put)\s+)?
        (?:(?:at|on)\s+)?
        (?P<at>[a-z][0-9]+)
        (?:\s+(?P<dir>\w+))?$",
        )
        .unwrap()
    });
    static PREVIEW: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(?:preview|show|\?)\s+(?P<at>[a-z][0-9]+)$").unwrap());

    println!();
    println!("{}, place your ships. Type help or ? for commands.", name);
    loop {
        println!();
        match setup.current() {
            Some(class) => {
                print!(
                    "Next: {} (length {}, {})",
                    class,
                    class.length(),
                    setup.orientation()
                );
                let rest = &setup.pending()[1..];
                if !rest.is_empty() {
                    print!(". Then:");
                    for class in rest {
                        print!(" {}", class);
                    }
                }
                println!();
            }
            None => println!("All ships placed, type done to start."),
        }
        show_setup_board(setup, &[]);
        println!();

        let cmd = input.read_input_lower("> ", |input| match input {
            "?" | "help" | "h" => Some(Command::Help),
            "done" | "start" => Some(Command::Done),
            "rotate" | "r" | "turn" => Some(Command::Rotate),
            "undo" | "u" => Some(Command::Undo),
            "clear" => Some(Command::Clear),
            "randomize" | "random" | "rand" => Some(Command::Randomize),
            other => {
                if let Some(captures) = PREVIEW.captures(other) {
                    parse_coord(&captures["at"]).map(Command::Preview)
                } else if let Some(captures) = PLACE.captures(other) {
                    let at = parse_coord(&captures["at"])?;
                    let dir = match captures.name("dir").map(|dir| dir.as_str()) {
                        None => None,
                        Some("h") | Some("horizontal") | Some("across") => {
                            Some(Orientation::Horizontal)
                        }
                        Some("v") | Some("vertical") | Some("down") => Some(Orientation::Vertical),
                        Some(other) => {
                            println!("invalid direction {}, choose \"h\" or \"v\"", other);
                            return None;
                        }
                    };
                    Some(Command::Place(at, dir))
                } else {
                    println!("Invalid setup command \"{}\". Use '?' for help", other);
                    None
                }
            }
        })?;

        match cmd {
            Command::Done if setup.is_ready() => break,
            Command::Done => println!("You must place all your ships first!"),
            Command::Place(at, dir) => {
                if let Some(dir) = dir {
                    setup.set_orientation(dir);
                }
                match setup.place(at) {
                    Ok(Some(_)) => {}
                    Ok(None) => println!("Every ship is already placed."),
                    Err(err) => println!("Invalid placement: {}.", err.reason()),
                }
            }
            Command::Preview(at) => match setup.preview(at) {
                Some(preview) => {
                    show_setup_board(setup, &preview.cells);
                    match preview.valid {
                        Ok(()) => println!("{} fits at {}.", setup.pending()[0], at.label()),
                        Err(reason) => println!("Can't place there: {}.", reason),
                    }
                }
                None => println!("Every ship is already placed."),
            },
            Command::Rotate => {
                let orientation = setup.toggle_orientation();
                println!("Now placing {}.", orientation);
            }
            Command::Undo => {
                if setup.placed() == 0 {
                    println!("Nothing to undo.");
                } else {
                    setup.undo();
                }
            }
            Command::Clear => setup.clear(),
            Command::Randomize => {
                if let Err(err) = setup.randomize(engine, rng) {
                    warn!("random placement failed: {}", err);
                    println!("Could not place the fleet at random: {}", err);
                }
            }
            Command::Help => {
                println!(
                    "Available Commands:
    done                      if all ships are placed, finish setup.
    place <cell> [h|v]        place the next ship starting at the given cell, e.g. \"place b3 v\".
        The word \"place\" may be left out. Ships extend right (h) or down (v).
    preview <cell>            show where the next ship would go.
    rotate                    switch between horizontal and vertical.
    undo                      take back the last placed ship.
    clear                     remove every placed ship.
    randomize                 place the whole fleet at random."
                );
            }
        }
    }
    Ok(())
}

/// Parse a cell label, reporting bad input to the player.
fn parse_coord(label: &str) -> Option<Coordinate> {
    match label.parse() {
        Ok(coord) => Some(coord),
        Err(err) => {
            println!("{}", err);
            None
        }
    }
}

/// Hide the screen between players.
fn hand_over(from: &str, input: &mut InputReader<impl BufRead>) -> io::Result<()> {
    input.read_input(
        &format!("{}, press enter and pass the terminal on.", from),
        |_| Some(()),
    )?;
    for _ in 0..40 {
        println!();
    }
    Ok(())
}

/// Run the attack phase until somebody wins.
fn play(
    game: &mut Match,
    fleet: &[ShipClass],
    input: &mut InputReader<impl BufRead>,
) -> io::Result<()> {
    enum Command {
        Attack(Coordinate),
        History,
        Score,
        Help,
        Quit,
    }
    static ATTACK: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^(?:(?:fire|attack|shoot)\s+(?:at\s+)?)?(?P<at>[a-z][0-9]+)$").unwrap()
    });

    loop {
        let attacker = game.current_side();
        let defender = game.defending_side();
        println!();
        println!("{}'s turn ({}).", game.current_player().name(), attacker);
        println!("Enemy waters:");
        show_hidden_board(game.player(defender).board(), fleet);
        println!("Your fleet:");
        show_revealed_board(game.player(attacker).board(), fleet);
        println!();

        let size = game.defending_player().board().size();
        let cmd = input.read_input_lower("fire at>", |input| match input {
            "?" | "help" | "h" => Some(Command::Help),
            "history" | "log" => Some(Command::History),
            "score" | "status" => Some(Command::Score),
            "quit" | "exit" => Some(Command::Quit),
            other => match ATTACK.captures(other) {
                Some(captures) => {
                    let at = parse_coord(&captures["at"])?;
                    if at.row >= size || at.col >= size {
                        println!("{} is not on the board.", at.label());
                        return None;
                    }
                    Some(Command::Attack(at))
                }
                None => {
                    println!("Invalid command \"{}\". Use '?' for help", other);
                    None
                }
            },
        })?;

        let at = match cmd {
            Command::Attack(at) => at,
            Command::History => {
                show_history(game);
                continue;
            }
            Command::Score => {
                show_score(game);
                continue;
            }
            Command::Help => {
                println!(
                    "Available Commands:
    <cell>      fire at a cell of the enemy board, e.g. \"c4\" or \"fire at c4\".
    history     show the most recent attacks.
    score       show hits and remaining ships.
    quit        end the game."
                );
                continue;
            }
            Command::Quit => return Ok(()),
        };

        let result = match game.attack(at) {
            Ok(result) => result,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };
        match result.outcome {
            Outcome::AlreadyAttacked => {
                println!("You already fired at {}. Pick another cell.", at.label());
                continue;
            }
            Outcome::Miss => println!("{}: miss.", at.label()),
            Outcome::Hit(_) => println!("{}: hit!", at.label()),
            Outcome::HitAndSunk(id) => println!(
                "{}: hit! You sank their {}!",
                at.label(),
                ShipName(fleet.get(id.index()).copied())
            ),
        }

        if let Some((_, name)) = result.winner {
            println!();
            println!("{} wins!", name);
            for &side in Side::BOTH.iter() {
                println!("{}'s fleet:", game.player(side).name());
                show_revealed_board(game.player(side).board(), fleet);
            }
            show_score(game);
            return Ok(());
        }
        hand_over(game.player(attacker).name(), input)?;
    }
}

/// Print the attacks within the history window.
fn show_history(game: &Match) {
    let mut any = false;
    for record in game.recent_history() {
        any = true;
        let what = match record.outcome {
            Outcome::Miss => "miss",
            _ if record.sunk => "sunk",
            _ => "hit",
        };
        println!("  {:<12} {:>4}  {}", record.attacker, record.label, what);
    }
    if !any {
        println!("  No attacks yet.");
    }
}

fn show_score(game: &Match) {
    let snapshot = game.snapshot();
    for player in snapshot.players.iter() {
        println!(
            "  {:<12} hits: {:>3}  ships afloat: {}  lost: {}",
            player.name, player.hits, player.remaining, player.sunk
        );
    }
}

/// Sound cues. A graphical front end would play audio here.
fn play_cue(event: &MatchEvent) {
    let cue = match event {
        MatchEvent::Miss { .. } => "*splash*",
        MatchEvent::Hit { .. } => "*boom*",
        MatchEvent::Sunk { .. } => "*glug glug*",
        MatchEvent::Victory { .. } => "*fanfare*",
        MatchEvent::TurnChanged { .. } => return,
    };
    println!("{}", cue);
}

/// Print the setup board, marking `highlight` cells.
fn show_setup_board(setup: &FleetSetup, highlight: &[Coordinate]) {
    enum SetupCell {
        Empty,
        Highlight,
        Ship(ShipAbbreviation),
    }
    impl fmt::Display for SetupCell {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                SetupCell::Empty => f.pad("~~"),
                SetupCell::Highlight => f.pad("[]"),
                SetupCell::Ship(abbrev) => fmt::Display::fmt(abbrev, f),
            }
        }
    }
    let fleet = setup.fleet();
    show_board(
        setup.board().size(),
        setup.board().rows().map(move |row| {
            row.map(move |cell| match cell.vessel() {
                _ if highlight.contains(&cell.coord()) => SetupCell::Highlight,
                Some(vessel) => SetupCell::Ship(ShipAbbreviation(
                    fleet.get(vessel.id().index()).copied(),
                )),
                None => SetupCell::Empty,
            })
        }),
    )
}

/// Print a board as its owner sees it.
fn show_revealed_board(board: &Board, fleet: &[ShipClass]) {
    enum RevealedCell {
        Empty,
        Shot,
        NotShot(ShipAbbreviation),
        Hit(ShipAbbreviation),
        Sunk(ShipAbbreviation),
    }
    impl fmt::Display for RevealedCell {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                RevealedCell::Empty => f.pad("~~"),
                RevealedCell::Shot => f.pad("x"),
                RevealedCell::NotShot(ship) => fmt::Display::fmt(ship, f),
                RevealedCell::Hit(ship) => f.pad(&format!("x{}", ship)),
                RevealedCell::Sunk(ship) => f.pad(&format!("X{}", ship)),
            }
        }
    }
    show_board(
        board.size(),
        board.rows().map(move |row| {
            row.map(move |cell| {
                let abbrev = abbreviation(&cell, fleet);
                match cell.vessel() {
                    None if cell.attacked() => RevealedCell::Shot,
                    None => RevealedCell::Empty,
                    Some(vessel) if vessel.sunk() => RevealedCell::Sunk(abbrev),
                    Some(_) if cell.attacked() => RevealedCell::Hit(abbrev),
                    Some(_) => RevealedCell::NotShot(abbrev),
                }
            })
        }),
    )
}

/// Print a board as the opponent sees it. Ship types are only revealed once sunk.
fn show_hidden_board(board: &Board, fleet: &[ShipClass]) {
    enum HiddenCell {
        NotShot,
        Miss,
        Hit,
        Sunk(ShipAbbreviation),
    }
    impl fmt::Display for HiddenCell {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                HiddenCell::NotShot => f.pad("~~"),
                HiddenCell::Miss => f.pad("x"),
                HiddenCell::Hit => f.pad("X"),
                HiddenCell::Sunk(ship) => f.pad(&format!("X{}", ship)),
            }
        }
    }
    show_board(
        board.size(),
        board.rows().map(move |row| {
            row.map(move |cell| match cell.vessel() {
                _ if !cell.attacked() => HiddenCell::NotShot,
                None => HiddenCell::Miss,
                Some(vessel) if vessel.sunk() => HiddenCell::Sunk(abbreviation(&cell, fleet)),
                Some(_) => HiddenCell::Hit,
            })
        }),
    )
}

fn abbreviation(cell: &CellRef<'_>, fleet: &[ShipClass]) -> ShipAbbreviation {
    ShipAbbreviation(
        cell.vessel()
            .and_then(|vessel| fleet.get(vessel.id().index()))
            .copied(),
    )
}

/// Show the board by printing the grid, with numbered columns and lettered rows. Takes an
/// iterator over the rows of iterators over the items.
fn show_board(size: usize, rows: impl Iterator<Item = impl Iterator<Item = impl fmt::Display>>) {
    print!("   ");
    for i in 1..=size {
        print!("{:^4}", i);
    }
    println!();
    for (i, row) in rows.enumerate() {
        let label = Coordinate::new(i, 0).label().to_string();
        print!("{:>2} ", label.trim_end_matches(char::is_numeric));
        for cell in row {
            print!("{:^4}", cell);
        }
        println!();
    }
}

/// Display helper that prints the ship's full name.
struct ShipName(Option<ShipClass>);

impl fmt::Display for ShipName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(class) => f.pad(class.name()),
            None => f.pad("ship"),
        }
    }
}

/// Display helper that prints the first two letters of the ship's class.
struct ShipAbbreviation(Option<ShipClass>);

impl fmt::Display for ShipAbbreviation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let abbrev: String = match self.0 {
            Some(class) => class
                .name()
                .chars()
                .take(2)
                .map(|c| c.to_ascii_lowercase())
                .collect(),
            None => "??".to_owned(),
        };
        f.pad(&abbrev)
    }
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`. Converts
    /// to ascii lower before running the checker.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Repeatedly tries to read input until the input checker returns `Some`.
    fn read_input<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<()> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            process::exit(0);
        }
        Ok(())
    }
}
