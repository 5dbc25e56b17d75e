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
use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};
use sortbot_challenges::shelf_relay::{position_of, InsertionContext, InsertionStrategy};

/// Draws a valid slot at random, then makes sure the overflow shelf is grabbed
/// before its partner at their shared access point.
pub struct PartnerFirst {
    rng: SmallRng,
}

impl PartnerFirst {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl InsertionStrategy for PartnerFirst {
    fn name(&self) -> &str {
        "partner_first"
    }

    fn choose_slot(&mut self, ctx: &InsertionContext<'_>) -> Result<usize> {
        let valid_slots = ctx.valid_slots();
        let slot = *valid_slots
            .choose(&mut self.rng)
            .ok_or_else(|| anyhow!("No valid slot for {}", ctx.special_shelf))?;
        let partner = match ctx.partner() {
            Some(partner) => partner,
            None => return Ok(slot),
        };

        let pickup = ctx.pickup_with(slot)?;
        if position_of(&pickup, ctx.special_shelf)? < position_of(&pickup, partner)? {
            return Ok(slot);
        }
        // move the overflow shelf directly ahead of its partner
        for &candidate in &valid_slots {
            let pickup = ctx.pickup_with(candidate)?;
            if position_of(&pickup, ctx.special_shelf)? + 1 == position_of(&pickup, partner)? {
                log::debug!(
                    "partner_first: moved {} from slot {} to {}",
                    ctx.special_shelf,
                    slot,
                    candidate
                );
                return Ok(candidate);
            }
        }
        Ok(slot)
    }
}
