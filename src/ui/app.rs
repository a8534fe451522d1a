use chrono::NaiveDate;
use std::fmt::Write;

use crate::config::{Binding, Config, KeySpec};
use crate::events::{Dispatcher, Event};

use super::{CalendarWindow, Context};

use unsegen::base::{Cursor, Terminal, Window};
use unsegen::input::{Behavior, Input, Key};
use unsegen::widget::*;

pub struct App<'a> {
    config: &'a Config,
    context: Context,
}

impl<'a> App<'a> {
    pub fn new(config: &'a Config, value: Option<NaiveDate>) -> App<'a> {
        let context = Context::new(value, config.orientation);
        App { config, context }
    }

    fn as_widget<'w>(&'w self) -> impl Widget + 'w
    where
        'a: 'w,
    {
        let context = &self.context;
        context.picker().render(move |payload| {
            VLayout::new()
                .widget(CalendarWindow::new(
                    payload,
                    context.focused(),
                    &context.theme,
                ))
                .widget(StatusLine(context))
        })
    }

    pub fn run(
        &mut self,
        dispatcher: Dispatcher,
        mut term: Terminal,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut run = true;

        self.context.mount();

        while run {
            // Draw
            let root = term.create_root_window();
            self.as_widget().draw(root, RenderingHints::new());
            term.present();

            // Handle events
            match dispatcher.next()? {
                Event::Update => self.context.update(),
                Event::Input(input) => {
                    if let Some(leftover) = input
                        .chain(KeyBehaviour {
                            context: &mut self.context,
                            config: self.config,
                            quit: &mut run,
                        })
                        .finish()
                    {
                        log::debug!("Unhandled input {:?}", leftover.event);
                    }
                }
            }
        }

        Ok(())
    }
}

fn key_spec(key: Key) -> Option<KeySpec> {
    match key {
        Key::Char(c) => Some(KeySpec::from_char(c)),
        Key::Left => Some(KeySpec::Left),
        Key::Right => Some(KeySpec::Right),
        Key::Up => Some(KeySpec::Up),
        Key::Down => Some(KeySpec::Down),
        Key::Esc => Some(KeySpec::Esc),
        _ => None,
    }
}

/// Feeds keys through the configured bindings into the picker.
struct KeyBehaviour<'a> {
    context: &'a mut Context,
    config: &'a Config,
    quit: &'a mut bool,
}

impl Behavior for KeyBehaviour<'_> {
    fn input(self, input: Input) -> Option<Input> {
        let binding = match input.event {
            unsegen::input::Event::Key(key) => {
                key_spec(key).and_then(|spec| self.config.keys.lookup(spec))
            }
            _ => None,
        };

        match binding {
            Some(Binding::Quit) => {
                *self.quit = false;
                None
            }
            Some(Binding::Picker(key)) => {
                self.context.handle_key(key);
                None
            }
            None => Some(input),
        }
    }
}

struct StatusLine<'a>(&'a Context);

impl Widget for StatusLine<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(10),
            height: RowDemand::exact(1),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let context = self.0;
        let mut cursor = Cursor::new(&mut window);

        let selected = context
            .picker()
            .selected_date()
            .map_or("-".to_owned(), |day| day.format("%Y-%m-%d").to_string());

        let result = match context.last_change() {
            Some(day) => write!(
                &mut cursor,
                " Selected: {}  (last change {}, {})",
                selected,
                day,
                context.now().format("%H:%M")
            ),
            None => write!(
                &mut cursor,
                " Selected: {}  ({})",
                selected,
                context.now().format("%H:%M")
            ),
        };

        if let Err(err) = result {
            log::warn!("Error while writing status line: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_keys_map_to_key_specs() {
        assert_eq!(key_spec(Key::Char('\n')), Some(KeySpec::Enter));
        assert_eq!(key_spec(Key::Char(' ')), Some(KeySpec::Space));
        assert_eq!(key_spec(Key::Char('\t')), Some(KeySpec::Tab));
        assert_eq!(key_spec(Key::Left), Some(KeySpec::Left));
        assert_eq!(key_spec(Key::F(1)), None);
    }
}
