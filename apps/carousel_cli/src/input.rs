//! Parsing of stdin lines into renderer inputs.

use shared::protocol::CarouselCommand;

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Command(CarouselCommand),
    /// Visible fraction of the carousel section, as a layout engine would report it.
    Ratio(f64),
    Scroll(f64),
    Section(String),
    Menu,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  next | n              advance one item
  prev | p              go back one item
  goto <index>          jump to an indicator dot
  autoplay on|off       toggle automatic advancement
  visible on|off        force the visibility signal
  ratio <0..1>          report the section's visible fraction
  hover | leave         pointer enters or leaves the carousel
  scroll <offset>       report page scroll offset to the navigation bar
  section <id>          follow a navigation link to a page section
  menu                  toggle the mobile menu
  show                  print the current item again
  {\"type\": ...}        any command as JSON
  quit | q              detach and exit";

pub fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim();
    if line.starts_with('{') {
        return serde_json::from_str::<CarouselCommand>(line)
            .map(Input::Command)
            .map_err(|error| format!("invalid command json: {error}"));
    }

    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(Input::Show);
    };
    let arg = parts.next();

    let input = match verb.to_ascii_lowercase().as_str() {
        "next" | "n" => Input::Command(CarouselCommand::Next),
        "prev" | "p" => Input::Command(CarouselCommand::Prev),
        "goto" | "go" | "g" => {
            let index = required(arg, verb)?
                .parse::<i64>()
                .map_err(|_| format!("'{verb}' expects an integer index"))?;
            Input::Command(CarouselCommand::GoTo { index })
        }
        "autoplay" => Input::Command(CarouselCommand::SetAutoPlaying {
            enabled: parse_switch(required(arg, verb)?)?,
        }),
        "visible" => Input::Command(CarouselCommand::VisibilityChanged {
            visible: parse_switch(required(arg, verb)?)?,
        }),
        "hover" => Input::Command(CarouselCommand::PointerEnter),
        "leave" => Input::Command(CarouselCommand::PointerLeave),
        "ratio" => Input::Ratio(parse_number(required(arg, verb)?, verb)?),
        "scroll" => Input::Scroll(parse_number(required(arg, verb)?, verb)?),
        "section" => Input::Section(required(arg, verb)?.to_string()),
        "menu" => Input::Menu,
        "show" => Input::Show,
        "help" | "?" => Input::Help,
        "quit" | "q" | "exit" => Input::Quit,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(input)
}

fn required<'a>(arg: Option<&'a str>, verb: &str) -> Result<&'a str, String> {
    arg.ok_or_else(|| format!("'{verb}' needs an argument"))
}

fn parse_switch(raw: &str) -> Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Ok(true),
        "off" | "false" | "0" | "no" => Ok(false),
        other => Err(format!("expected on/off, got '{other}'")),
    }
}

fn parse_number(raw: &str, verb: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .map_err(|_| format!("'{verb}' expects a number"))
}
