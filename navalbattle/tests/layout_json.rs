// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![cfg(feature = "serde")]

use navalbattle::{ships::STANDARD_LENGTHS, Coordinate, GameConfig, Layout, Match, Side};

/// Layout as written by a browser setup screen, which also stores ship metadata.
const SETUP_JSON: &str = r#"[
    {"id": 0, "name": "Carrier", "length": 5,
     "cells": [{"row": 0, "col": 0}, {"row": 0, "col": 1}, {"row": 0, "col": 2},
               {"row": 0, "col": 3}, {"row": 0, "col": 4}]},
    {"id": 1, "name": "Battleship", "length": 4,
     "cells": [{"row": 2, "col": 0}, {"row": 3, "col": 0}, {"row": 4, "col": 0},
               {"row": 5, "col": 0}]},
    {"id": 2, "name": "Submarine", "length": 3,
     "cells": [{"row": 9, "col": 7}, {"row": 9, "col": 8}, {"row": 9, "col": 9}]},
    {"id": 3, "name": "Cruiser", "length": 3,
     "cells": [{"row": 4, "col": 4}, {"row": 5, "col": 4}, {"row": 6, "col": 4}]},
    {"id": 4, "name": "Destroyer", "length": 2,
     "cells": [{"row": 7, "col": 7}, {"row": 7, "col": 8}]}
]"#;

#[test]
fn setup_layout_parses_and_validates() {
    let layout: Layout = serde_json::from_str(SETUP_JSON).unwrap();
    assert_eq!(layout.vessels().len(), 5);
    assert_eq!(layout.vessels()[4].cells[1], Coordinate::new(7, 8));
    assert_eq!(layout.validate(10, &STANDARD_LENGTHS), Ok(()));
}

#[test]
fn parsed_layout_starts_a_match() {
    let layout: Layout = serde_json::from_str(SETUP_JSON).unwrap();
    let mut game =
        Match::from_layouts(&GameConfig::default(), "Ana", &layout, "Bia", &layout).unwrap();
    assert_eq!(game.player(Side::Second).remaining(), 5);

    let result = game.attack(Coordinate::new(7, 7)).unwrap();
    assert!(result.outcome.is_hit());
    assert_eq!(game.current_side(), Side::Second);
}

#[test]
fn layout_serializes_back_to_cells_only() {
    let layout: Layout = serde_json::from_str(
        r#"[{"cells": [{"row": 1, "col": 2}]}]"#,
    )
    .unwrap();
    let json = serde_json::to_string(&layout).unwrap();
    assert_eq!(json, r#"[{"cells":[{"row":1,"col":2}]}]"#);
}

#[test]
fn snapshot_serializes() {
    let layout: Layout = serde_json::from_str(SETUP_JSON).unwrap();
    let mut game =
        Match::from_layouts(&GameConfig::default(), "Ana", &layout, "Bia", &layout).unwrap();
    game.attack(Coordinate::new(0, 0)).unwrap();

    let value = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(value["players"][0]["name"], "Ana");
    assert_eq!(value["players"][0]["hits"], 1);
    assert_eq!(value["history"][0]["label"], "A1");
    assert_eq!(value["current"], "Second");
}
