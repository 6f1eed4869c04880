use std::io;
use std::time::Duration;

use log::debug;

use crate::game::Game;
use crate::input::{Command, InputSource};
use crate::renderer;
use crate::scheduler::{Clock, Scheduler};
use crate::surface::RenderSurface;

/// Input wait while no tick is armed.
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Runs the cooperative game loop until a quit command arrives.
///
/// Each iteration waits for input until the next armed tick, dispatches the
/// command, then runs the tick when it is due. Every state change is redrawn.
pub fn run<S, I, C>(
    game: &mut Game,
    surface: &mut S,
    input: &mut I,
    clock: &C,
    tick_interval: Duration,
) -> io::Result<()>
where
    S: RenderSurface + ?Sized,
    I: InputSource + ?Sized,
    C: Clock + ?Sized,
{
    let mut scheduler = Scheduler::new(tick_interval);
    renderer::render(surface, game)?;

    loop {
        let timeout = scheduler
            .time_until_due(clock.now())
            .unwrap_or(IDLE_POLL_INTERVAL);

        if let Some(command) = input.poll(timeout)? {
            if command == Command::Quit {
                debug!("quit requested");
                break;
            }

            if let Some(schedule) = game.handle(command) {
                scheduler.apply(schedule, clock.now());
            }
            renderer::render(surface, game)?;
        }

        if scheduler.take_due(clock.now()) {
            let schedule = game.tick();
            scheduler.apply(schedule, clock.now());
            renderer::render(surface, game)?;
        }
    }

    Ok(())
}
