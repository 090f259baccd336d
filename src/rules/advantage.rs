//! Element advantage table.
//!
//! Each of the five named elements beats exactly two others and is beaten
//! by exactly two. `Other` neither beats nor is beaten.
//!
//! | attacker | beats |
//! |---|---|
//! | fire | nature, air |
//! | water | fire, earth |
//! | nature | water, earth |
//! | earth | fire, air |
//! | air | water, nature |

use crate::cards::Element;

// Rows: attacker, columns: defender, both in `Element::ALL` order.
const F: bool = false;
const T: bool = true;
const BEATS: [[bool; 6]; 6] = [
    //        fire water nature earth air other
    /* fire   */ [F, F, T, F, T, F],
    /* water  */ [T, F, F, T, F, F],
    /* nature */ [F, T, F, T, F, F],
    /* earth  */ [T, F, F, F, T, F],
    /* air    */ [F, T, T, F, F, F],
    /* other  */ [F, F, F, F, F, F],
];

/// Does `attacker` have the advantage over `defender`?
#[must_use]
pub const fn beats(attacker: Element, defender: Element) -> bool {
    BEATS[attacker.index()][defender.index()]
}
