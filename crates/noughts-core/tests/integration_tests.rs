//! Integration tests for the Noughts game engine.
//!
//! These tests play complete games on every supported board size.

use noughts_core::*;

/// Play positions in order, each by whoever's turn it is
fn play(game: &mut GameState, positions: &[usize]) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for &position in positions {
        let player = game.current_player_id();
        events.extend(
            game.apply_action(player, GameAction::PlaceMark(position))
                .unwrap_or_else(|e| panic!("move {} failed: {}", position, e)),
        );
    }
    events
}

/// Play the first valid action each turn until the game ends
fn play_out(game: &mut GameState) {
    let max_turns = game.board().cell_count();
    let mut turns = 0;

    while !game.is_finished() && turns < max_turns {
        let action = game
            .valid_actions()
            .into_iter()
            .next()
            .expect("unfinished game should have a valid action");
        let player = game.current_player_id();
        game.apply_action(player, action).unwrap();
        turns += 1;
    }

    assert!(
        game.is_finished(),
        "Game should finish within {} turns",
        max_turns
    );
}

#[test]
fn test_fresh_games_for_every_size() {
    for size in MIN_SIZE..=MAX_SIZE {
        let game = GameState::new(GameConfig::new(size, 2), &SymbolPalette::default()).unwrap();
        assert!(!game.board().is_full());
        assert_eq!(game.board().check_winner(), None);
        assert_eq!(game.valid_actions().len(), size * size);
    }
}

#[test]
fn test_row_win_on_every_size() {
    for size in MIN_SIZE..=MAX_SIZE {
        let mut game =
            GameState::new(GameConfig::new(size, 2), &SymbolPalette::default()).unwrap();

        // X walks along the top row, O along the second
        let mut positions = Vec::new();
        for col in 1..=size {
            positions.push(col);
            if col < size {
                positions.push(size + col);
            }
        }

        let events = play(&mut game, &positions);
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameWon {
                player: 0,
                symbol: "X".to_string(),
                line: Line::Row(0),
            }),
            "size {}",
            size
        );
    }
}

#[test]
fn test_four_player_column_win() {
    let mut game = GameState::new(GameConfig::new(4, 4), &SymbolPalette::default()).unwrap();

    // Each seat takes its own column for three rounds, then the bottom
    // row is shuffled so only # completes a column
    play(
        &mut game,
        &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 14, 15, 13, 16],
    );

    let winner = game.winner().expect("# should win");
    assert_eq!(winner.symbol(), "#");
    assert!(matches!(
        game.phase(),
        GamePhase::Won {
            winner: 3,
            line: Line::Column(3),
            ..
        }
    ));
}

#[test]
fn test_games_always_terminate() {
    for size in MIN_SIZE..=MAX_SIZE {
        for players in MIN_PLAYERS..=DEFAULT_SYMBOLS.len() {
            let mut game =
                GameState::new(GameConfig::new(size, players), &SymbolPalette::default())
                    .unwrap();
            play_out(&mut game);

            match game.phase() {
                GamePhase::Won { symbol, .. } => {
                    assert_eq!(game.board().check_winner(), Some(symbol.as_str()));
                }
                GamePhase::Draw => assert!(game.board().is_full()),
                GamePhase::InProgress => unreachable!(),
            }
        }
    }
}

#[test]
fn test_board_record_move_contract() {
    for size in MIN_SIZE..=MAX_SIZE {
        let mut board = Board::new(size).unwrap();
        let x = Player::new("X");
        let o = Player::new("O");

        assert!(!board.record_move(0, &x));
        assert!(!board.record_move(size * size + 1, &x));

        for position in 1..=size * size {
            assert!(!board.is_full());
            assert!(board.record_move(position, &x));
            assert!(!board.record_move(position, &o));
        }
        assert!(board.is_full());
    }
}

#[test]
fn test_render_after_play() {
    let mut game = GameState::new(GameConfig::default(), &SymbolPalette::default()).unwrap();
    play(&mut game, &[5, 1, 9]);

    assert_eq!(
        game.board().render(),
        " O| 2| 3|\n---------\n 4| X| 6|\n---------\n 7| 8| X|\n---------\n"
    );
}

#[test]
fn test_game_state_serializes() {
    let mut game = GameState::new(GameConfig::default(), &SymbolPalette::default()).unwrap();
    play(&mut game, &[1, 2, 5, 3, 9]);

    let json = serde_json::to_value(&game).unwrap();
    assert_eq!(json["turn_number"], 5);
    assert_eq!(json["phase"]["Won"]["symbol"], "X");
    assert_eq!(json["phase"]["Won"]["line"], "Diagonal");
}
