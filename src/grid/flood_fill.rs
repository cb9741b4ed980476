//! Weight relaxation from the goal outward.

use super::{Grid, Position};
use crate::config::{MAX_FLOOD_SWEEPS, WEIGHT_MAX};
use crate::heading::Heading;

/// Outcome of one [`Grid::recompute_weights`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FloodReport {
    /// Full-grid sweeps performed, including the final unchanged one.
    pub sweeps: u8,
    /// False when the sweep cap was hit while weights were still moving.
    pub converged: bool,
}

impl Grid {
    /// Relax every non-goal cell to `1 + min(open neighbor weights)` until a
    /// sweep changes nothing or [`MAX_FLOOD_SWEEPS`] sweeps have run.
    ///
    /// Hitting the cap is not an error: weights are left as the last sweep
    /// wrote them. Cells cut off from the goal by a closed wall ring never
    /// settle and keep climbing until the cap stops them.
    pub fn recompute_weights(&mut self) -> FloodReport {
        let goal = self.goal();
        let mut sweeps = 0;

        while sweeps < MAX_FLOOD_SWEEPS {
            sweeps += 1;
            let mut changed = false;

            for pos in Self::positions() {
                if pos == goal {
                    continue;
                }
                let Some(i) = Self::index(pos) else {
                    continue;
                };

                let best = self.min_open_neighbor(pos);
                let weight = if best == WEIGHT_MAX { WEIGHT_MAX } else { best + 1 };

                if weight != self.cells[i].weight {
                    self.cells[i].weight = weight;
                    changed = true;
                }
            }

            if !changed {
                return FloodReport {
                    sweeps,
                    converged: true,
                };
            }
        }

        FloodReport {
            sweeps,
            converged: false,
        }
    }

    fn min_open_neighbor(&self, pos: Position) -> u8 {
        Heading::ALL
            .into_iter()
            .filter(|&dir| !self.has_wall(pos, dir))
            .map(|dir| pos.neighbor(dir))
            .filter(|next| next.is_valid())
            .map(|next| self.weight(next))
            .min()
            .unwrap_or(WEIGHT_MAX)
    }
}
