use cucumber::given;

use crate::cucumber::{academy_world::AcademySystem, AcademyWorld};

#[given("a fresh install")]
async fn fresh_install(world: &mut AcademyWorld) {
    let system = AcademySystem::new().await;
    world.system = Some(system);
}

#[given("the ledger is failing")]
async fn ledger_is_failing(world: &mut AcademyWorld) {
    world.system().ledger.set_failing(true);
}

#[given("the mail relay is failing")]
async fn mail_relay_is_failing(world: &mut AcademyWorld) {
    world.system().notifier.set_failing(true);
}
