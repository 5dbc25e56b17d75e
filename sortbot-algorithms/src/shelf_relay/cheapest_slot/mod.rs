/*!
Copyright 2024 sortbot contributors

Licensed under the MIT License. You may obtain a copy of the License in the
LICENSE file at the root of this repository.

Unless required by applicable law or agreed to in writing, software distributed
under the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR
CONDITIONS OF ANY KIND, either express or implied. See the License for the specific
language governing permissions and limitations under the License.
*/

use anyhow::{anyhow, Result};
use sortbot_challenges::shelf_relay::{InsertionContext, InsertionStrategy, Solution};

/// Prices every valid slot and keeps the cheapest, lowest slot on ties.
#[derive(Debug, Copy, Clone, Default)]
pub struct CheapestSlot;

impl InsertionStrategy for CheapestSlot {
    fn name(&self) -> &str {
        "cheapest_slot"
    }

    fn choose_slot(&mut self, ctx: &InsertionContext<'_>) -> Result<usize> {
        let mut best: Option<(usize, f64)> = None;
        for slot in ctx.valid_slots() {
            let solution = Solution {
                pickup_order: ctx.pickup_with(slot)?,
            };
            let cost = ctx.challenge.evaluate_total_cost(&solution)?;
            if best.map_or(true, |(_, best_cost)| cost < best_cost) {
                best = Some((slot, cost));
            }
        }
        best.map(|(slot, _)| slot)
            .ok_or_else(|| anyhow!("No valid slot for {}", ctx.special_shelf))
    }
}
