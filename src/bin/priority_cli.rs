#[cfg(target_arch = "wasm32")]
fn main() {
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("priority_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use priority_engine::capture::{GestureEvent, Hand, JointRecorder, RecorderOptions, TrackedJoint};
    use priority_engine::geom::{Point3, shift_start_point};
    use priority_engine::priority::SceneSnapshot;
    use serde::Serialize;
    use std::fs;
    use std::path::Path;

    const USAGE: &str = r#"priority_cli (priority-engine)

USAGE:
  priority_cli resolve <scene.json> [--threshold <t>] [--pretty]
  priority_cli closest <scene.json> <polyline-id> <x,y,z>
  priority_cli shift <scene.json> <polyline-id> <start-index> [--pretty]
  priority_cli replay <events.json> [--hand left|right] [--joint <joint>] [--pretty]

COMMANDS:
  resolve    Assign the scene's points to its polylines and print the priority lists
  closest    Print the polyline vertex closest to a point
  shift      Print the polyline rotated to start at <start-index>
  replay     Run a recorded gesture stream through the joint recorder and print the takes

OPTIONS:
  --threshold <t>    Override the scene's assignment threshold
  --hand <hand>      Hand to sample in replay (default: right)
  --joint <joint>    index_tip | thumb_tip | palm | wrist (default: index_tip)
  --pretty           Pretty-print JSON output
  -h, --help         Show this help
"#;

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "resolve" => cmd_resolve(&mut args),
            "closest" => cmd_closest(&mut args),
            "shift" => cmd_shift(&mut args),
            "replay" => cmd_replay(&mut args),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn cmd_resolve(args: &mut Args) -> Result<(), String> {
        let scene = load_scene(&args.positional("scene file")?)?;

        let mut options = scene.options();
        let mut pretty = false;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--threshold" => {
                    options = options.with_threshold(parse_f64(&args.value("--threshold")?)?);
                }
                "--pretty" => pretty = true,
                other => return Err(unknown_option(other)),
            }
        }

        let (priority, diagnostics) = scene.resolve(options).map_err(|e| e.to_string())?;
        for name in &diagnostics.assignment.dropped_points {
            eprintln!("not assigned: {name}");
        }
        for warning in diagnostics.warnings() {
            eprintln!("warning: {warning}");
        }
        print_json(&priority, pretty)
    }

    fn cmd_closest(args: &mut Args) -> Result<(), String> {
        let scene = load_scene(&args.positional("scene file")?)?;
        let id = args.positional("polyline id")?;
        let point = parse_point(&args.positional("point")?)?;
        if let Some(extra) = args.next() {
            return Err(unknown_option(&extra));
        }

        let polyline = scene
            .polyline(&id)
            .ok_or_else(|| format!("unknown polyline `{id}`"))?;
        match polyline.closest_point(point) {
            Some(hit) => print_json(&hit, false),
            None => Err(format!("polyline `{id}` has no points")),
        }
    }

    fn cmd_shift(args: &mut Args) -> Result<(), String> {
        let scene = load_scene(&args.positional("scene file")?)?;
        let id = args.positional("polyline id")?;
        let start_arg = args.positional("start index")?;
        let start: usize = start_arg
            .parse()
            .map_err(|_| format!("invalid start index `{start_arg}`"))?;

        let mut pretty = false;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--pretty" => pretty = true,
                other => return Err(unknown_option(other)),
            }
        }

        let polyline = scene
            .polyline(&id)
            .ok_or_else(|| format!("unknown polyline `{id}`"))?;
        let shifted = shift_start_point(polyline, start).map_err(|e| e.to_string())?;
        print_json(&shifted, pretty)
    }

    fn cmd_replay(args: &mut Args) -> Result<(), String> {
        let path = args.positional("events file")?;

        let mut options = RecorderOptions::default();
        let mut pretty = false;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--hand" => options.hand = parse_hand(&args.value("--hand")?)?,
                "--joint" => options.joint = parse_joint(&args.value("--joint")?)?,
                "--pretty" => pretty = true,
                other => return Err(unknown_option(other)),
            }
        }

        let text = read_file(&path)?;
        let events: Vec<GestureEvent> =
            serde_json::from_str(&text).map_err(|e| format!("parse {path}: {e}"))?;

        let mut recorder = JointRecorder::new(options);
        recorder.replay(&events);
        if !recorder.buffered().is_empty() {
            eprintln!(
                "warning: take {} still open, {} samples discarded",
                recorder.current_take(),
                recorder.buffered().len()
            );
        }
        print_json(recorder.log(), pretty)
    }

    fn load_scene(path: &str) -> Result<SceneSnapshot, String> {
        let text = read_file(path)?;
        SceneSnapshot::from_json(&text).map_err(|e| format!("parse {path}: {e}"))
    }

    fn read_file(path: &str) -> Result<String, String> {
        fs::read_to_string(Path::new(path)).map_err(|e| format!("read {path}: {e}"))
    }

    fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<(), String> {
        let text = if pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
        .map_err(|e| format!("serialize output: {e}"))?;
        println!("{text}");
        Ok(())
    }

    fn parse_f64(text: &str) -> Result<f64, String> {
        text.trim()
            .parse()
            .map_err(|_| format!("invalid number `{text}`"))
    }

    fn parse_point(text: &str) -> Result<Point3, String> {
        let coords = text
            .split(',')
            .map(parse_f64)
            .collect::<Result<Vec<_>, _>>()?;
        match coords.as_slice() {
            [x, y, z] => Ok(Point3::new(*x, *y, *z)),
            _ => Err(format!("expected x,y,z but got `{text}`")),
        }
    }

    fn parse_hand(text: &str) -> Result<Hand, String> {
        match text {
            "left" => Ok(Hand::Left),
            "right" => Ok(Hand::Right),
            other => Err(format!("unknown hand `{other}`")),
        }
    }

    fn parse_joint(text: &str) -> Result<TrackedJoint, String> {
        match text {
            "index_tip" => Ok(TrackedJoint::IndexTip),
            "thumb_tip" => Ok(TrackedJoint::ThumbTip),
            "palm" => Ok(TrackedJoint::Palm),
            "wrist" => Ok(TrackedJoint::Wrist),
            other => Err(format!("unknown joint `{other}`")),
        }
    }

    fn unknown_option(option: &str) -> String {
        format!("unknown option `{option}`\n\n{USAGE}")
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        }

        fn positional(&mut self, what: &str) -> Result<String, String> {
            self.next().ok_or_else(|| format!("missing {what}"))
        }
    }
}
