use terminal_caterpillar::config::{Difficulty, Playfield};
use terminal_caterpillar::creature::Point;
use terminal_caterpillar::game::{DeathReason, Game, Phase};
use terminal_caterpillar::input::{Command, Heading};
use terminal_caterpillar::scheduler::Schedule;
use terminal_caterpillar::spawner::Item;

#[test]
fn stepwise_eating_turning_and_wall_collision() {
    let mut game = Game::new_with_seed(Playfield::new(300.0, 300.0), Difficulty::Normal, 42);

    assert_eq!(game.handle(Command::Start), Some(Schedule::Immediate));
    game.spawner.set_item(Item::at(Point::new(20.0, 0.0)));

    assert_eq!(game.tick(), Schedule::Next);
    assert_eq!(game.state.score, 1);
    assert_eq!(game.creature.len(), 3);
    assert_eq!(game.creature.head(), Point::new(20.0, 0.0));

    let item = game.spawner.item().expect("a new item should be placed");
    assert_eq!(item.position, Point::ORIGIN);
    game.spawner.set_item(Item::at(Point::new(-100.0, -100.0)));

    game.handle(Command::Steer(Heading::Up));
    assert_eq!(game.tick(), Schedule::Next);
    let head = game.creature.head();
    assert_eq!(head.x, 20.0);
    assert!((head.y - 21.0).abs() < 1e-9);

    let mut ticks = 0;
    while game.tick() == Schedule::Next {
        ticks += 1;
        assert!(ticks < 20, "creature should reach the wall");
    }

    assert_eq!(game.phase(), Phase::Idle);
    assert_eq!(game.state.high_score, 1);
    assert_eq!(
        game.last_game_over.map(|summary| summary.reason),
        Some(DeathReason::WallCollision)
    );
}
