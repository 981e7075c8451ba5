//! Given steps for work order lifecycle BDD scenarios.

use super::world::{run_async, SeededSite, TaskFlowWorld};
use eyre::WrapErr;
use mockable::{Clock, DefaultClock};
use rstest_bdd_macros::given;
use siteline::account::{
    domain::{Account, Principal, Role},
    ports::AccountRepository,
};
use siteline::inventory::{
    domain::{BranchId, InventoryItem, StockLevel, Unit},
    ports::InventoryRepository,
};
use siteline::site::{
    domain::{Section, Site},
    ports::SiteRepository,
};
use siteline::task::{
    domain::MaterialLine,
    services::CreateTaskRequest,
};

#[given(r#"a registered client site with section "{section_name}""#)]
fn registered_client_site(
    world: &mut TaskFlowWorld,
    section_name: String,
) -> Result<(), eyre::Report> {
    let client = Account::new("Mercer Holdings", Role::Client, &DefaultClock)
        .wrap_err("create client account")?;
    run_async(world.accounts.store(&client)).wrap_err("store client account")?;

    let mut site = Site::new(
        client.id(),
        "Riverside Mall",
        "12 Quay Street",
        "retail",
        &DefaultClock,
    )
    .wrap_err("create site")?;
    let section = Section::new(section_name).wrap_err("create section")?;
    let section_id = site.add_section(section, &DefaultClock);
    run_async(world.sites.store(&site)).wrap_err("store site")?;

    world.seeded_site = Some(SeededSite {
        site_id: site.id(),
        section_id,
        client_id: client.id(),
    });
    Ok(())
}

#[given("an assignable worker")]
fn assignable_worker(world: &mut TaskFlowWorld) -> Result<(), eyre::Report> {
    let worker =
        Account::new("Dana Ortiz", Role::Worker, &DefaultClock).wrap_err("create worker")?;
    run_async(world.accounts.store(&worker)).wrap_err("store worker")?;
    world.worker_id = Some(worker.id());
    Ok(())
}

#[given("a pending task targeting the section")]
fn pending_task(world: &mut TaskFlowWorld) -> Result<(), eyre::Report> {
    let seeded = world.seeded_site()?;
    let created = run_async(world.lifecycle.create_task(
        &world.admin,
        CreateTaskRequest::new(seeded.site_id, vec![seeded.section_id], DefaultClock.utc()),
    ))
    .wrap_err("create pending task")?;
    world.task = Some(created);
    Ok(())
}

#[given(r#"the branch stocks {quantity:f64} kg of "{name}""#)]
fn branch_stocks(
    world: &mut TaskFlowWorld,
    quantity: f64,
    name: String,
) -> Result<(), eyre::Report> {
    let stock = StockLevel::new(quantity, 0.0).wrap_err("create stock level")?;
    let item = InventoryItem::new(BranchId::new(), name.clone(), Unit::Kg, stock, &DefaultClock)
        .wrap_err("create inventory item")?;
    run_async(world.inventory.store(&item)).wrap_err("store inventory item")?;
    world.items.insert(name, item.id());
    Ok(())
}

#[given(r#"a pending task planning {quantity:f64} kg of "{name}""#)]
fn pending_task_with_materials(
    world: &mut TaskFlowWorld,
    quantity: f64,
    name: String,
) -> Result<(), eyre::Report> {
    let seeded = world.seeded_site()?;
    let item_id = world.item_id(&name)?;
    let line = MaterialLine::new(item_id, quantity, Unit::Kg).wrap_err("create material line")?;
    let created = run_async(world.lifecycle.create_task(
        &world.admin,
        CreateTaskRequest::new(seeded.site_id, vec![seeded.section_id], DefaultClock.utc())
            .with_materials(vec![line]),
    ))
    .wrap_err("create planned task")?;
    world.task = Some(created);
    Ok(())
}

#[given("the task has been assigned and started")]
fn task_assigned_and_started(world: &mut TaskFlowWorld) -> Result<(), eyre::Report> {
    let worker_id = world.worker_id()?;
    let task_id = world.task()?.id();

    run_async(world.lifecycle.assign_worker(&world.admin, task_id, worker_id))
        .wrap_err("assign task in scenario setup")?;
    let started = run_async(world.lifecycle.start_task(
        &Principal::new(worker_id, Role::Worker),
        task_id,
        None,
    ))
    .wrap_err("start task in scenario setup")?;
    world.task = Some(started);
    Ok(())
}

#[given("the task has been completed")]
fn task_completed(world: &mut TaskFlowWorld) -> Result<(), eyre::Report> {
    let worker_id = world.worker_id()?;
    let task_id = world.task()?.id();

    let completed = run_async(world.lifecycle.complete_task(
        &Principal::new(worker_id, Role::Worker),
        task_id,
        None,
    ))
    .wrap_err("complete task in scenario setup")?;
    world.task = Some(completed);
    Ok(())
}
