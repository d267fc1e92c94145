//! Line-oriented replay scripts.
//!
//! A script names windows symbolically, issues engine commands against a
//! [`HeadlessPlatform`], feeds raw events and checks the resulting state.
//! Every window gets a [`RecordingPeer`] labelled with its name, so a run
//! produces a single ordered notification log.
//!
//! ```text
//! # comments and blank lines are ignored
//! create main
//! create menu owner=main type=popup frame=untitled
//! view menu
//! level main floating
//! event menu press 1 10 10
//! event menu motion 30 12 button1
//! expect drag menu
//! ```

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use crate::config::EngineConfig;
use crate::cursor::CursorKind;
use crate::drivers::HeadlessPlatform;
use crate::error::WmError;
use crate::events::{
    ButtonEvent, Configure, CrossingEvent, KeyEvent, MotionEvent, PointerPos, RawEvent,
    ScrollEvent, StateMask, WindowStateEvent,
};
use crate::input::{RawState, ScrollDirection};
use crate::peer::{Notification, NotificationLog, RecordingPeer};
use crate::window::{
    Bounds, Capabilities, CreateParams, FrameType, Level, WindowId, WindowManager, WindowType,
};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("line {line}: no window named `{name}`")]
    UnknownName { line: usize, name: String },
    #[error("line {line}: window `{name}` already exists")]
    DuplicateName { line: usize, name: String },
    #[error("line {line}: {source}")]
    Engine {
        line: usize,
        #[source]
        source: WmError,
    },
    #[error("line {line}: expectation failed: {message}")]
    Expectation { line: usize, message: String },
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq)]
enum Expectation {
    Owner(String, Option<String>),
    Children(String, Vec<String>),
    OnTop(String, bool),
    Alive(String, bool),
    Grab(Option<String>),
    Drag(Option<String>),
}

#[derive(Debug, Clone, PartialEq)]
enum Step {
    Create {
        name: String,
        frame_type: FrameType,
        window_type: WindowType,
        owner: Option<String>,
        closable: bool,
    },
    View(String, bool),
    Destroy(String),
    Visible(String, bool),
    Bounds {
        name: String,
        width: i32,
        height: i32,
        position: Option<(i32, i32)>,
    },
    Resizable(String, bool),
    MinSize(String, i32, i32),
    MaxSize(String, i32, i32),
    Title(String, String),
    Alpha(String, f64),
    Enabled(String, bool),
    Level(String, Level),
    Owner(String, Option<String>),
    AddChild(String, String),
    RemoveChild(String, String),
    OnTopTree(String, bool),
    Grab(String),
    Ungrab(String),
    DragGrab(String),
    DragUngrab,
    Cursor(String, CursorKind),
    Fullscreen(String, bool),
    Minimize(String, bool),
    Maximize(String, bool),
    Front(String),
    Back(String),
    Focus(String),
    Event(String, RawEvent),
    Expect(Expectation),
}

struct Line<'a> {
    number: usize,
    words: Vec<&'a str>,
    text: &'a str,
}

impl<'a> Line<'a> {
    fn err(&self, message: impl Into<String>) -> ScriptError {
        ScriptError::Parse {
            line: self.number,
            message: message.into(),
        }
    }

    fn word(&self, index: usize) -> Result<&'a str, ScriptError> {
        self.words
            .get(index)
            .copied()
            .ok_or_else(|| self.err(format!("`{}` expects more arguments", self.words[0])))
    }

    fn name(&self, index: usize) -> Result<String, ScriptError> {
        self.word(index).map(str::to_string)
    }

    fn int(&self, index: usize) -> Result<i32, ScriptError> {
        let word = self.word(index)?;
        word.parse()
            .map_err(|_| self.err(format!("`{word}` is not an integer")))
    }

    fn float(&self, index: usize) -> Result<f64, ScriptError> {
        let word = self.word(index)?;
        word.parse()
            .map_err(|_| self.err(format!("`{word}` is not a number")))
    }

    fn flag(&self, index: usize) -> Result<bool, ScriptError> {
        match self.word(index)? {
            "on" | "yes" | "true" => Ok(true),
            "off" | "no" | "false" => Ok(false),
            other => Err(self.err(format!("`{other}` is not on/off"))),
        }
    }

    fn optional_name(&self, index: usize) -> Result<Option<String>, ScriptError> {
        Ok(match self.word(index)? {
            "none" => None,
            name => Some(name.to_string()),
        })
    }

    fn state(&self, index: usize) -> Result<RawState, ScriptError> {
        match self.words.get(index) {
            Some(word) => parse_state(word).map_err(|m| self.err(m)),
            None => Ok(RawState::empty()),
        }
    }

    fn pos(&self, index: usize) -> Result<PointerPos, ScriptError> {
        let x = f64::from(self.int(index)?);
        let y = f64::from(self.int(index + 1)?);
        Ok(PointerPos::new(x, y, x, y))
    }

    /// Everything after the first `skip` words, verbatim.
    fn rest(&self, skip: usize) -> String {
        let mut rest = self.text.trim_start();
        for _ in 0..skip {
            rest = rest
                .split_once(char::is_whitespace)
                .map(|(_, tail)| tail.trim_start())
                .unwrap_or("");
        }
        rest.trim_end().to_string()
    }
}

fn parse_state(word: &str) -> Result<RawState, String> {
    word.split(',')
        .filter(|part| !part.is_empty())
        .try_fold(RawState::empty(), |acc, part| {
            let bit = match part {
                "shift" => RawState::SHIFT,
                "lock" => RawState::LOCK,
                "ctrl" | "control" => RawState::CONTROL,
                "alt" | "mod1" => RawState::MOD1,
                "super" => RawState::SUPER,
                "meta" => RawState::META,
                "button1" => RawState::BUTTON1,
                "button2" => RawState::BUTTON2,
                "button3" => RawState::BUTTON3,
                "button4" => RawState::BUTTON4,
                "button5" => RawState::BUTTON5,
                other => return Err(format!("unknown modifier `{other}`")),
            };
            Ok(acc | bit)
        })
}

fn parse_window_state(word: &str) -> Result<StateMask, String> {
    word.split(',')
        .filter(|part| !part.is_empty() && *part != "none")
        .try_fold(StateMask::empty(), |acc, part| {
            let bit = match part {
                "iconified" => StateMask::ICONIFIED,
                "maximized" => StateMask::MAXIMIZED,
                "fullscreen" => StateMask::FULLSCREEN,
                "above" => StateMask::ABOVE,
                other => return Err(format!("unknown window state `{other}`")),
            };
            Ok(acc | bit)
        })
}

/// A single character, or a keysym in hex (`0xff0d`).
fn parse_keysym(word: &str) -> Result<u32, String> {
    if let Some(hex) = word.strip_prefix("0x") {
        return u32::from_str_radix(hex, 16).map_err(|_| format!("bad keysym `{word}`"));
    }
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(u32::from(c)),
        _ => Err(format!("bad keysym `{word}`")),
    }
}

fn parse_event(line: &Line<'_>) -> Result<RawEvent, ScriptError> {
    let kind = line.word(2)?;
    let event = match kind {
        "realize" => RawEvent::Realize,
        "press" | "release" => {
            let button = u32::try_from(line.int(3)?)
                .map_err(|_| line.err("button numbers are positive"))?;
            let ev = ButtonEvent {
                button,
                pos: line.pos(4)?,
                state: line.state(6)?,
            };
            if kind == "press" {
                RawEvent::ButtonPress(ev)
            } else {
                RawEvent::ButtonRelease(ev)
            }
        }
        "motion" => RawEvent::Motion(MotionEvent {
            pos: line.pos(3)?,
            state: line.state(5)?,
        }),
        "scroll" => {
            let direction = match line.word(3)? {
                "up" => ScrollDirection::Up,
                "down" => ScrollDirection::Down,
                "left" => ScrollDirection::Left,
                "right" => ScrollDirection::Right,
                "smooth" => ScrollDirection::Smooth,
                other => return Err(line.err(format!("unknown scroll direction `{other}`"))),
            };
            RawEvent::Scroll(ScrollEvent {
                direction,
                pos: line.pos(4)?,
                state: line.state(6)?,
            })
        }
        "enter" | "leave" => RawEvent::Crossing(CrossingEvent {
            enter: kind == "enter",
            pos: line.pos(3)?,
            state: line.state(5)?,
        }),
        "key-press" | "key-release" => RawEvent::Key(KeyEvent {
            press: kind == "key-press",
            keysym: parse_keysym(line.word(3)?).map_err(|m| line.err(m))?,
            state: line.state(4)?,
        }),
        "focus-in" => RawEvent::Focus { focus_in: true },
        "focus-out" => RawEvent::Focus { focus_in: false },
        "state" => RawEvent::WindowState(WindowStateEvent {
            changed: parse_window_state(line.word(3)?).map_err(|m| line.err(m))?,
            new_state: parse_window_state(line.word(4)?).map_err(|m| line.err(m))?,
        }),
        "configure" => RawEvent::ConfigureWindow(Configure {
            x: line.int(3)?,
            y: line.int(4)?,
            width: line.int(5)?,
            height: line.int(6)?,
        }),
        "configure-view" => RawEvent::ConfigureView {
            width: line.int(3)?,
            height: line.int(4)?,
        },
        "paint" => RawEvent::Paint,
        "delete" => RawEvent::Delete,
        "destroy" => RawEvent::Destroy,
        other => return Err(line.err(format!("unknown event `{other}`"))),
    };
    Ok(event)
}

fn parse_create(line: &Line<'_>) -> Result<Step, ScriptError> {
    let mut frame_type = FrameType::Titled;
    let mut window_type = WindowType::Normal;
    let mut owner = None;
    let mut closable = true;
    for option in line.words.iter().skip(2) {
        let Some((key, value)) = option.split_once('=') else {
            return Err(line.err(format!("expected key=value, got `{option}`")));
        };
        match (key, value) {
            ("frame", "titled") => frame_type = FrameType::Titled,
            ("frame", "untitled") => frame_type = FrameType::Untitled,
            ("frame", "transparent") => frame_type = FrameType::Transparent,
            ("frame", "extended") => frame_type = FrameType::Extended,
            ("type", "normal") => window_type = WindowType::Normal,
            ("type", "utility") => window_type = WindowType::Utility,
            ("type", "popup") => window_type = WindowType::Popup,
            ("owner", name) => owner = Some(name.to_string()),
            ("closable", "yes" | "on" | "true") => closable = true,
            ("closable", "no" | "off" | "false") => closable = false,
            _ => return Err(line.err(format!("bad create option `{option}`"))),
        }
    }
    Ok(Step::Create {
        name: line.name(1)?,
        frame_type,
        window_type,
        owner,
        closable,
    })
}

fn parse_expect(line: &Line<'_>) -> Result<Expectation, ScriptError> {
    let what = line.word(1)?;
    Ok(match what {
        "owner" => Expectation::Owner(line.name(2)?, line.optional_name(3)?),
        "children" => Expectation::Children(
            line.name(2)?,
            line.words.iter().skip(3).map(|w| w.to_string()).collect(),
        ),
        "on-top" => Expectation::OnTop(line.name(2)?, line.flag(3)?),
        "alive" => Expectation::Alive(line.name(2)?, line.flag(3)?),
        "grab" => Expectation::Grab(line.optional_name(2)?),
        "drag" => Expectation::Drag(line.optional_name(2)?),
        other => return Err(line.err(format!("unknown expectation `{other}`"))),
    })
}

fn parse_line(line: &Line<'_>) -> Result<Step, ScriptError> {
    let step = match line.words[0] {
        "create" => parse_create(line)?,
        "view" => {
            let attach = match line.words.get(2) {
                Some(&"none") => false,
                Some(other) => return Err(line.err(format!("unexpected `{other}`"))),
                None => true,
            };
            Step::View(line.name(1)?, attach)
        }
        "destroy" => Step::Destroy(line.name(1)?),
        "show" => Step::Visible(line.name(1)?, true),
        "hide" => Step::Visible(line.name(1)?, false),
        "bounds" => Step::Bounds {
            name: line.name(1)?,
            width: line.int(2)?,
            height: line.int(3)?,
            position: match line.words.len() {
                4 => None,
                _ => Some((line.int(4)?, line.int(5)?)),
            },
        },
        "resizable" => Step::Resizable(line.name(1)?, line.flag(2)?),
        "min-size" => Step::MinSize(line.name(1)?, line.int(2)?, line.int(3)?),
        "max-size" => Step::MaxSize(line.name(1)?, line.int(2)?, line.int(3)?),
        "title" => Step::Title(line.name(1)?, line.rest(2)),
        "alpha" => Step::Alpha(line.name(1)?, line.float(2)?),
        "enabled" => Step::Enabled(line.name(1)?, line.flag(2)?),
        "level" => {
            let level = match line.word(2)? {
                "normal" => Level::Normal,
                "floating" => Level::Floating,
                "topmost" => Level::TopMost,
                other => return Err(line.err(format!("unknown level `{other}`"))),
            };
            Step::Level(line.name(1)?, level)
        }
        "owner" => Step::Owner(line.name(1)?, line.optional_name(2)?),
        "add-child" => Step::AddChild(line.name(1)?, line.name(2)?),
        "remove-child" => Step::RemoveChild(line.name(1)?, line.name(2)?),
        "ontop-tree" => Step::OnTopTree(line.name(1)?, line.flag(2)?),
        "grab" => Step::Grab(line.name(1)?),
        "ungrab" => Step::Ungrab(line.name(1)?),
        "drag-grab" => Step::DragGrab(line.name(1)?),
        "drag-ungrab" => Step::DragUngrab,
        "cursor" => {
            let word = line.word(2)?;
            let cursor = CursorKind::from_name(word)
                .ok_or_else(|| line.err(format!("unknown cursor `{word}`")))?;
            Step::Cursor(line.name(1)?, cursor)
        }
        "fullscreen" => Step::Fullscreen(line.name(1)?, line.flag(2)?),
        "minimize" => Step::Minimize(line.name(1)?, line.flag(2)?),
        "maximize" => Step::Maximize(line.name(1)?, line.flag(2)?),
        "front" => Step::Front(line.name(1)?),
        "back" => Step::Back(line.name(1)?),
        "focus" => Step::Focus(line.name(1)?),
        "event" => Step::Event(line.name(1)?, parse_event(line)?),
        "expect" => Step::Expect(parse_expect(line)?),
        other => return Err(line.err(format!("unknown command `{other}`"))),
    };
    Ok(step)
}

/// Cuts a trailing comment. `#` only starts a comment at the start of a
/// word, so `title w Tab #2` keeps its hash.
fn strip_comment(text: &str) -> &str {
    let mut previous = ' ';
    for (index, c) in text.char_indices() {
        if c == '#' && previous.is_whitespace() {
            return &text[..index];
        }
        previous = c;
    }
    text
}

fn parse(source: &str) -> Result<Vec<(usize, Step)>, ScriptError> {
    let mut steps = Vec::new();
    for (index, text) in source.lines().enumerate() {
        let text = strip_comment(text);
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }
        let line = Line {
            number: index + 1,
            words,
            text,
        };
        steps.push((line.number, parse_line(&line)?));
    }
    Ok(steps)
}

/// Runs scripts against a headless window manager.
pub struct ScriptRunner {
    wm: WindowManager<HeadlessPlatform>,
    names: HashMap<String, WindowId>,
    log: NotificationLog,
}

impl Default for ScriptRunner {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ScriptRunner {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            wm: WindowManager::with_config(HeadlessPlatform::new(), config),
            names: HashMap::new(),
            log: NotificationLog::default(),
        }
    }

    pub fn manager(&self) -> &WindowManager<HeadlessPlatform> {
        &self.wm
    }

    pub fn window(&self, name: &str) -> Option<WindowId> {
        self.names.get(name).copied()
    }

    pub fn notifications(&self) -> Vec<(String, Notification)> {
        self.log.borrow().clone()
    }

    /// Notification log, one `label: notification` entry per line.
    pub fn render_log(&self) -> String {
        self.log
            .borrow()
            .iter()
            .map(|(label, notification)| format!("{label}: {notification:?}\n"))
            .collect()
    }

    pub fn run_file(&mut self, path: &Path) -> Result<(), ScriptError> {
        let source = std::fs::read_to_string(path)?;
        self.run(&source)
    }

    /// Parses the whole script, then runs it. Nothing runs if any line
    /// fails to parse.
    pub fn run(&mut self, source: &str) -> Result<(), ScriptError> {
        let steps = parse(source)?;
        tracing::debug!(steps = steps.len(), "running script");
        for (line, step) in steps {
            self.step(line, step)?;
        }
        Ok(())
    }

    fn resolve(&self, line: usize, name: &str) -> Result<WindowId, ScriptError> {
        self.window(name).ok_or_else(|| ScriptError::UnknownName {
            line,
            name: name.to_string(),
        })
    }

    fn name_of(&self, id: WindowId) -> String {
        self.names
            .iter()
            .find(|(_, v)| **v == id)
            .map(|(k, _)| k.clone())
            .unwrap_or_else(|| format!("{id:?}"))
    }

    fn step(&mut self, line: usize, step: Step) -> Result<(), ScriptError> {
        let engine = |source: WmError| ScriptError::Engine { line, source };
        match step {
            Step::Create {
                name,
                frame_type,
                window_type,
                owner,
                closable,
            } => {
                if self.names.contains_key(&name) {
                    return Err(ScriptError::DuplicateName { line, name });
                }
                let capabilities = if closable {
                    Capabilities::CLOSABLE
                } else {
                    Capabilities::empty()
                };
                let mut params = CreateParams::new(frame_type)
                    .window_type(window_type)
                    .capabilities(capabilities)
                    .peer(RecordingPeer::new(name.clone(), self.log.clone()));
                if let Some(owner) = owner {
                    params = params.owner(self.resolve(line, &owner)?);
                }
                let id = self.wm.create(params).map_err(engine)?;
                self.names.insert(name, id);
            }
            Step::View(name, attach) => {
                let id = self.resolve(line, &name)?;
                let view = attach.then(|| {
                    Box::new(RecordingPeer::new(name.clone(), self.log.clone()))
                        as Box<dyn crate::peer::ViewPeer>
                });
                self.wm.set_view(id, view).map_err(engine)?;
            }
            Step::Destroy(name) => {
                let id = self.resolve(line, &name)?;
                self.wm.destroy(id).map_err(engine)?;
            }
            Step::Visible(name, visible) => {
                let id = self.resolve(line, &name)?;
                self.wm.set_visible(id, visible).map_err(engine)?;
            }
            Step::Bounds {
                name,
                width,
                height,
                position,
            } => {
                let id = self.resolve(line, &name)?;
                let mut bounds = Bounds::size(width, height);
                if let Some((x, y)) = position {
                    bounds = bounds.at(x, y);
                }
                self.wm.set_bounds(id, bounds).map_err(engine)?;
            }
            Step::Resizable(name, on) => {
                let id = self.resolve(line, &name)?;
                self.wm.set_resizable(id, on).map_err(engine)?;
            }
            Step::MinSize(name, w, h) => {
                let id = self.resolve(line, &name)?;
                self.wm.set_minimum_size(id, w, h).map_err(engine)?;
            }
            Step::MaxSize(name, w, h) => {
                let id = self.resolve(line, &name)?;
                self.wm.set_maximum_size(id, w, h).map_err(engine)?;
            }
            Step::Title(name, title) => {
                let id = self.resolve(line, &name)?;
                self.wm.set_title(id, &title).map_err(engine)?;
            }
            Step::Alpha(name, alpha) => {
                let id = self.resolve(line, &name)?;
                self.wm.set_alpha(id, alpha).map_err(engine)?;
            }
            Step::Enabled(name, on) => {
                let id = self.resolve(line, &name)?;
                self.wm.set_enabled(id, on).map_err(engine)?;
            }
            Step::Level(name, level) => {
                let id = self.resolve(line, &name)?;
                self.wm.set_level(id, level).map_err(engine)?;
            }
            Step::Owner(name, owner) => {
                let id = self.resolve(line, &name)?;
                let owner = owner.map(|o| self.resolve(line, &o)).transpose()?;
                self.wm.set_owner(id, owner).map_err(engine)?;
            }
            Step::AddChild(parent, child) => {
                let (parent, child) = (self.resolve(line, &parent)?, self.resolve(line, &child)?);
                self.wm.add_child(parent, child).map_err(engine)?;
            }
            Step::RemoveChild(parent, child) => {
                let (parent, child) = (self.resolve(line, &parent)?, self.resolve(line, &child)?);
                self.wm.remove_child(parent, child).map_err(engine)?;
            }
            Step::OnTopTree(name, on) => {
                let id = self.resolve(line, &name)?;
                self.wm.update_ontop_tree(id, on);
            }
            Step::Grab(name) => {
                let id = self.resolve(line, &name)?;
                let granted = self.wm.grab_focus(id).map_err(engine)?;
                tracing::debug!(line, window = %name, granted, "grab");
            }
            Step::Ungrab(name) => {
                let id = self.resolve(line, &name)?;
                self.wm.ungrab_focus(id).map_err(engine)?;
            }
            Step::DragGrab(name) => {
                let id = self.resolve(line, &name)?;
                let granted = self.wm.grab_mouse_drag_focus(id).map_err(engine)?;
                tracing::debug!(line, window = %name, granted, "drag grab");
            }
            Step::DragUngrab => self.wm.ungrab_mouse_drag_focus(),
            Step::Cursor(name, cursor) => {
                let id = self.resolve(line, &name)?;
                self.wm.set_cursor(id, cursor).map_err(engine)?;
            }
            Step::Fullscreen(name, on) => {
                let id = self.resolve(line, &name)?;
                if on {
                    self.wm.enter_fullscreen(id).map_err(engine)?;
                } else {
                    self.wm.exit_fullscreen(id).map_err(engine)?;
                }
            }
            Step::Minimize(name, on) => {
                let id = self.resolve(line, &name)?;
                self.wm.set_minimized(id, on).map_err(engine)?;
            }
            Step::Maximize(name, on) => {
                let id = self.resolve(line, &name)?;
                self.wm.set_maximized(id, on).map_err(engine)?;
            }
            Step::Front(name) => {
                let id = self.resolve(line, &name)?;
                self.wm.to_front(id).map_err(engine)?;
            }
            Step::Back(name) => {
                let id = self.resolve(line, &name)?;
                self.wm.to_back(id).map_err(engine)?;
            }
            Step::Focus(name) => {
                let id = self.resolve(line, &name)?;
                self.wm.request_focus(id).map_err(engine)?;
            }
            Step::Event(name, event) => {
                let id = self.resolve(line, &name)?;
                self.wm.dispatch(id, event).map_err(engine)?;
            }
            Step::Expect(expectation) => self.check(line, expectation)?,
        }
        Ok(())
    }

    fn check(&self, line: usize, expectation: Expectation) -> Result<(), ScriptError> {
        let fail = |message: String| Err(ScriptError::Expectation { line, message });
        match expectation {
            Expectation::Owner(name, expected) => {
                let id = self.resolve(line, &name)?;
                let actual = self.wm.owner(id).map(|o| self.name_of(o));
                if actual != expected {
                    return fail(format!("owner of `{name}` is {actual:?}, expected {expected:?}"));
                }
            }
            Expectation::Children(name, mut expected) => {
                let id = self.resolve(line, &name)?;
                let mut actual: Vec<String> = self
                    .wm
                    .children(id)
                    .into_iter()
                    .map(|c| self.name_of(c))
                    .collect();
                actual.sort();
                expected.sort();
                if actual != expected {
                    return fail(format!("children of `{name}` are {actual:?}, expected {expected:?}"));
                }
            }
            Expectation::OnTop(name, expected) => {
                let id = self.resolve(line, &name)?;
                let actual = self.wm.effective_on_top(id) || self.wm.kept_above(id);
                if actual != expected {
                    return fail(format!("on-top of `{name}` is {actual}, expected {expected}"));
                }
            }
            Expectation::Alive(name, expected) => {
                let id = self.resolve(line, &name)?;
                let actual = self.wm.contains(id);
                if actual != expected {
                    return fail(format!("`{name}` alive is {actual}, expected {expected}"));
                }
            }
            Expectation::Grab(expected) => {
                let actual = self.wm.grab_state().grab_window().map(|g| self.name_of(g));
                if actual != expected {
                    return fail(format!("grab holder is {actual:?}, expected {expected:?}"));
                }
            }
            Expectation::Drag(expected) => {
                let actual = self.wm.grab_state().drag_window().map(|d| self.name_of(d));
                if actual != expected {
                    return fail(format!("drag holder is {actual:?}, expected {expected:?}"));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modifier_lists() {
        assert_eq!(
            parse_state("shift,button1").unwrap(),
            RawState::SHIFT | RawState::BUTTON1
        );
        assert!(parse_state("hyper").is_err());
    }

    #[test]
    fn parses_keysyms() {
        assert_eq!(parse_keysym("a").unwrap(), 0x61);
        assert_eq!(parse_keysym("0xff0d").unwrap(), 0xff0d);
        assert!(parse_keysym("abc").is_err());
    }

    #[test]
    fn title_keeps_spaces() {
        let steps = parse("create w\ntitle w Hello  big world\n").unwrap();
        assert_eq!(
            steps[1].1,
            Step::Title("w".into(), "Hello  big world".into())
        );
    }

    #[test]
    fn parse_errors_carry_line_numbers() {
        let err = parse("create w\n\n# note\nbogus w\n").unwrap_err();
        assert!(matches!(err, ScriptError::Parse { line: 4, .. }));
    }

    #[test]
    fn comments_are_stripped() {
        let steps = parse("create w # main window\n").unwrap();
        assert_eq!(steps.len(), 1);
    }

    #[test]
    fn hash_inside_a_word_is_not_a_comment() {
        let steps = parse("create w\ntitle w Tab#2 # second tab\n").unwrap();
        assert_eq!(steps[1].1, Step::Title("w".into(), "Tab#2".into()));
        assert_eq!(strip_comment("#only"), "");
        assert_eq!(strip_comment("a\t#b"), "a\t");
    }
}
