//! Built-in level plans
//!
//! Plans are plain strings; rows may be indented, blank lines around them
//! are ignored. See `sim::level` for the character table.

/// Two coins, one patrolling lava block, a lava pit
pub const DEMO: &str = "
    ......................
    ..#................#..
    ..#..............=.#..
    ..#.........o.o....#..
    ..#.@......#####...#..
    ..#####............#..
    ......#++++++++++++#..
    ......##############..
    ......................";

pub const LEDGES: &str = "
    ..............................
    ..#........................#..
    ..#..........o.....o.......#..
    ..#.......#####..#####.....#..
    ..#..o.....................#..
    ..#####...........=........#..
    ......#.....v..........o...#..
    ..#...#.................####..
    ..#.@.#.......###..........#..
    ..#####++++++++++++++++#####..
    ..............................";

pub const TWIN_TOWERS: &str = "
    ........................
    .#....................#.
    .#.....o..........o...#.
    .#....###...|...###...#.
    .#....................#.
    .#..o.....=.......o...#.
    .#..###..........###..#.
    .#.@..................#.
    .######++++++++++######.
    ........................";

/// Levels in play order
pub const GAME_LEVELS: &[&str] = &[DEMO, LEDGES, TWIN_TOWERS];

/// Split a file of plans separated by blank lines
pub fn split_plans(text: &str) -> Vec<String> {
    let mut plans = Vec::new();
    let mut current = String::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                plans.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push_str(line.trim());
        current.push('\n');
    }
    if !current.is_empty() {
        plans.push(current);
    }
    plans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Level, State};
    use std::rc::Rc;

    #[test]
    fn test_builtin_levels_parse() {
        for (i, plan) in GAME_LEVELS.iter().enumerate() {
            let level = Level::parse(plan, i as u64)
                .unwrap_or_else(|e| panic!("level {} failed to parse: {}", i, e));
            let state = State::start(Rc::new(level));
            assert!(state.coins_left() > 0, "level {} has no coins", i);
            assert!(state.player().is_some());
        }
    }

    #[test]
    fn test_split_plans() {
        let text = "@.o\n...\n\n\n  #@o  \n#..\n";
        let plans = split_plans(text);
        assert_eq!(plans, vec!["@.o\n...\n".to_string(), "#@o\n#..\n".to_string()]);
    }
}
