/*!
Copyright 2024 sortbot contributors

Licensed under the MIT License. You may obtain a copy of the License in the
LICENSE file at the root of this repository.

Unless required by applicable law or agreed to in writing, software distributed
under the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR
CONDITIONS OF ANY KIND, either express or implied. See the License for the specific
language governing permissions and limitations under the License.
*/

use anyhow::Result;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use sortbot_challenges::shelf_relay::{InsertionContext, InsertionStrategy};

/// Any of the six slots with equal odds, slot 0 included. A draw that puts the
/// overflow shelf first is left for the planner to repair.
pub struct RandomSlot {
    rng: SmallRng,
}

impl RandomSlot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl InsertionStrategy for RandomSlot {
    fn name(&self) -> &str {
        "random_slot"
    }

    fn choose_slot(&mut self, ctx: &InsertionContext<'_>) -> Result<usize> {
        Ok(self.rng.gen_range(0..ctx.num_slots()))
    }
}
