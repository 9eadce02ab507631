use crate::config::{load_settings, project_paths, save_settings_atomic, Paths, Settings};
use crate::input::{collect_input_nonblocking, map_event_to_action, UiAction};
use crate::term::{canvas_to_cells, draw_box, draw_text, labels_to_cells, StageView, Terminal};
use anyhow::Context;
use chrono::{DateTime, Local};
use crossterm::style::Color;
use petscene::canvas::Transformed;
use petscene::{v2, Engine, FoodItem, GameHost, PetEvent, SceneKind, ToyItem};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

const TOAST_TTL: Duration = Duration::from_secs(4);
const TOAST_MAX: usize = 4;

const HELP: &str = "1-5  room / feed / play / bath / sleep\n\
click or space  pat the pet\n\
f  feed the selected food      p  play with the selected toy\n\
[ ]  change selection          s  splash (bath)\n\
b / B  next / previous breed   k  cat <-> dog\n\
r  restart the scene           h  close this help\n\
q  quit";

fn food_menu() -> Vec<FoodItem> {
    vec![
        FoodItem::new("fish", "Tuna", "🐟"),
        FoodItem::new("bone", "Meaty Bone", "🍖"),
        FoodItem::new("milk", "Milk", "🥛"),
        FoodItem::new("kibble", "Kibble", "🥣"),
        FoodItem::new("cake", "Birthday Cake", "🎂"),
    ]
}

fn toy_menu() -> Vec<ToyItem> {
    vec![
        ToyItem::new("ball", "Ball", "⚽"),
        ToyItem::new("yarn", "Yarn", "🧶"),
        ToyItem::new("feather", "Feather", "🪶"),
        ToyItem::new("laser", "Laser Pointer", "🔴"),
        ToyItem::new("frisbee", "Frisbee", "🥏"),
        ToyItem::new("squeaky", "Squeaky Toy", "🐭"),
    ]
}

struct Toast {
    at: DateTime<Local>,
    text: String,
    until: Instant,
}

type Toasts = Rc<RefCell<VecDeque<Toast>>>;

fn push_toast(toasts: &Toasts, text: String) {
    let mut q = toasts.borrow_mut();
    q.push_back(Toast {
        at: Local::now(),
        text,
        until: Instant::now() + TOAST_TTL,
    });
    while q.len() > TOAST_MAX {
        q.pop_front();
    }
}

pub(crate) struct App {
    settings: Settings,
    paths: Paths,
    host: GameHost,
    term: Terminal,
    foods: Vec<FoodItem>,
    toys: Vec<ToyItem>,
    food_idx: usize,
    toy_idx: usize,
    toasts: Toasts,
    show_help: bool,
    should_quit: bool,
}

impl App {
    fn init() -> anyhow::Result<Self> {
        let paths = project_paths()?;
        init_logging(&paths.log_path)?;
        let settings = load_settings(&paths.settings_path);

        let engine = Engine::new(settings.engine_config());
        let mut host = GameHost::boot(engine, settings.start_scene, settings.pet_params())?;

        let toasts: Toasts = Rc::new(RefCell::new(VecDeque::new()));
        let sink = Rc::clone(&toasts);
        host.subscribe(move |event: &PetEvent| push_toast(&sink, event.to_string()));

        let term = Terminal::begin()?;

        Ok(Self {
            settings,
            paths,
            host,
            term,
            foods: food_menu(),
            toys: toy_menu(),
            food_idx: 0,
            toy_idx: 0,
            toasts,
            show_help: false,
            should_quit: false,
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let fps = self.settings.fps_cap.clamp(10, 240);
        let frame_dt = Duration::from_secs_f32(1.0 / fps as f32);

        let mut last_frame = Instant::now();

        while !self.should_quit {
            let frame_start = Instant::now();
            self.term.resize_if_needed()?;

            for ev in collect_input_nonblocking(frame_dt)? {
                if let Some(action) = map_event_to_action(self.show_help, ev) {
                    self.apply(action);
                }
                if self.should_quit {
                    break;
                }
            }

            let now = Instant::now();
            let real_dt = now.saturating_duration_since(last_frame);
            last_frame = now;
            self.host.tick(real_dt);

            self.render_frame()?;
            spin_sleep(frame_dt, frame_start);
        }

        self.term.end()?;
        self.settings.remember_pet(self.host.params().breed);
        self.settings.start_scene = self.host.active_scene();
        save_settings_atomic(&self.paths.settings_path, &self.settings)?;
        Ok(())
    }

    fn apply(&mut self, action: UiAction) {
        let result = match action {
            UiAction::Quit => {
                self.should_quit = true;
                Ok(())
            }
            UiAction::HelpToggle => {
                self.show_help = !self.show_help;
                Ok(())
            }
            UiAction::Back => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
                Ok(())
            }
            UiAction::GoTo(kind) => self.host.switch_scene(kind),
            UiAction::Pat => {
                let center = self
                    .host
                    .scene()
                    .pet()
                    .map(|pet| pet.transform().apply(v2(0.0, -6.0)));
                match center {
                    Some(at) => self.host.pointer_down(at),
                    None => Ok(()),
                }
            }
            UiAction::PointerAt { col, row } => {
                let view = self.view();
                self.host.pointer_down(view.cell_to_stage(col, row))
            }
            UiAction::Feed => {
                let food = self.foods[self.food_idx].clone();
                self.host.feed_pet(food)
            }
            UiAction::Play => {
                let id = self.toys[self.toy_idx].id.clone();
                self.host.play_with(&id)
            }
            UiAction::Splash => self.host.splash(),
            UiAction::Select(step) => {
                match self.host.active_scene() {
                    SceneKind::Feed => {
                        self.food_idx = wrap(self.food_idx, step, self.foods.len());
                    }
                    _ => self.toy_idx = wrap(self.toy_idx, step, self.toys.len()),
                }
                Ok(())
            }
            UiAction::Breed(step) => self.host.cycle_breed(step),
            UiAction::ToggleKind => self.host.toggle_kind(),
            UiAction::Reset => self.host.reset(),
        };
        if let Err(e) = result {
            log::debug!("{action:?} refused: {e}");
            push_toast(&self.toasts, e.to_string());
        }
    }

    fn view(&self) -> StageView {
        StageView::fit(
            self.host.engine().stage_size(),
            self.term.canvas.width(),
            self.term.canvas.height(),
        )
    }

    fn render_frame(&mut self) -> anyhow::Result<()> {
        let bg = Color::Black;
        self.term.cur.clear(bg);
        self.term.canvas.clear(petscene::Color::TRANSPARENT);

        let view = self.view();
        {
            let mut stage = Transformed::new(&mut self.term.canvas, view.transform(), 1.0);
            self.host.draw(&mut stage);
        }
        canvas_to_cells(&self.term.canvas, &mut self.term.cur, self.settings.enable_color, bg);
        labels_to_cells(&self.term.canvas, &mut self.term.cur, self.settings.enable_color, bg);

        self.draw_hud(bg);

        if self.show_help {
            draw_box(&mut self.term.cur, "petscene: keys", HELP);
        }

        self.term.present(true)?;
        Ok(())
    }

    fn draw_hud(&mut self, bg: Color) {
        let params = self.host.params();
        let busy = if self.host.scene().is_busy() { "  (busy)" } else { "" };
        let selection = match self.host.active_scene() {
            SceneKind::Feed => {
                let f = &self.foods[self.food_idx];
                format!("food: {} {}", f.icon, f.label)
            }
            SceneKind::Play => {
                let t = &self.toys[self.toy_idx];
                format!("toy: {} {}", t.icon, t.label)
            }
            _ => String::new(),
        };
        let title = format!(" {}  {}  {}{}", self.host.active_scene(), params.breed, selection, busy);
        draw_text(&mut self.term.cur, 0, 0, &title, Color::Yellow, bg);

        let footer = " 1-5 scene  f feed  p play  s splash  b breed  k kind  h help  q quit";
        let rows = self.term.rows;
        draw_text(&mut self.term.cur, 0, rows.saturating_sub(1), footer, Color::DarkGrey, bg);

        let now = Instant::now();
        let mut toasts = self.toasts.borrow_mut();
        toasts.retain(|t| t.until > now);
        for (i, t) in toasts.iter().rev().enumerate() {
            let line = format!("{} {}", t.at.format("%H:%M:%S"), t.text);
            let x = self.term.cols.saturating_sub(line.chars().count() as u16 + 1);
            draw_text(&mut self.term.cur, x, 1 + i as u16, &line, Color::White, bg);
        }
    }
}

fn wrap(idx: usize, step: i32, len: usize) -> usize {
    let len = len.max(1) as i32;
    (idx as i32 + step).rem_euclid(len) as usize
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    // the terminal belongs to the scene, so logs go to a file
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

pub(crate) fn run() -> anyhow::Result<()> {
    let mut app = App::init()?;
    app.run()?;
    Ok(())
}

fn spin_sleep(target: Duration, start: Instant) {
    let end = start + target;
    loop {
        let t = Instant::now();
        if t >= end {
            break;
        }
        let left = end - t;
        if left > Duration::from_millis(2) {
            std::thread::sleep(Duration::from_millis(1));
        } else {
            std::hint::spin_loop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_wraps_both_ways() {
        assert_eq!(wrap(0, -1, 5), 4);
        assert_eq!(wrap(4, 1, 5), 0);
        assert_eq!(wrap(2, 1, 0), 0);
    }

    #[test]
    fn toasts_keep_only_the_newest() {
        let toasts: Toasts = Rc::new(RefCell::new(VecDeque::new()));
        for i in 0..6 {
            push_toast(&toasts, format!("t{i}"));
        }
        let q = toasts.borrow();
        assert_eq!(q.len(), TOAST_MAX);
        assert_eq!(q.front().map(|t| t.text.as_str()), Some("t2"));
    }
}
