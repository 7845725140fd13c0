use actor_framework::{ActorEntity, Filter, FrameworkError, ResourceActor};
use async_trait::async_trait;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Dish {
    id: u32,
    name: String,
    portions: u32,
}

#[derive(Debug)]
struct DishCreate {
    name: String,
}

#[derive(Debug)]
struct DishUpdate {
    name: Option<String>,
}

#[derive(Debug)]
enum DishAction {
    Cook(u32),
    Serve(u32),
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum DishError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("only {available} portions left")]
    NotEnough { available: u32 },
}

#[async_trait]
impl ActorEntity for Dish {
    type Id = u32;
    type Create = DishCreate;
    type Update = DishUpdate;
    type Action = DishAction;
    type ActionResult = u32;
    type Context = ();
    type Error = DishError;

    fn from_create_params(id: u32, params: DishCreate) -> Result<Self, Self::Error> {
        if params.name.is_empty() {
            return Err(DishError::EmptyName);
        }
        Ok(Self {
            id,
            name: params.name,
            portions: 0,
        })
    }

    async fn on_update(&mut self, update: DishUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            if name.is_empty() {
                return Err(DishError::EmptyName);
            }
            self.name = name;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: DishAction, _ctx: &()) -> Result<u32, Self::Error> {
        match action {
            DishAction::Cook(n) => {
                self.portions += n;
                Ok(self.portions)
            }
            DishAction::Serve(n) => {
                // Mutate first: a failed action must not leak this change
                self.portions = self.portions.saturating_sub(n);
                if self.portions == 0 && n > 0 {
                    return Err(DishError::NotEnough { available: 0 });
                }
                Ok(self.portions)
            }
        }
    }
}

fn dish(name: &str) -> DishCreate {
    DishCreate { name: name.into() }
}

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::<Dish>::new(10);
    let handle = tokio::spawn(actor.run(()));

    let id = client.create(dish("nasi lemak")).await.unwrap();
    assert_eq!(id, 1);

    assert_eq!(client.perform_action(id, DishAction::Cook(3)).await.unwrap(), 3);
    assert_eq!(client.perform_action(id, DishAction::Serve(1)).await.unwrap(), 2);

    let updated = client
        .update(id, DishUpdate { name: Some("nasi lemak special".into()) })
        .await
        .unwrap();
    assert_eq!(updated.name, "nasi lemak special");
    assert_eq!(updated.portions, 2);

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_failed_action_leaves_record_unchanged() {
    let (actor, client) = ResourceActor::<Dish>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(dish("roti canai")).await.unwrap();
    client.perform_action(id, DishAction::Cook(1)).await.unwrap();

    let err = client
        .perform_action(id, DishAction::Serve(5))
        .await
        .unwrap_err();
    assert_eq!(
        err.downcast_entity::<DishError>().unwrap(),
        DishError::NotEnough { available: 0 }
    );

    let stored = client.get(id).await.unwrap().unwrap();
    assert_eq!(stored.portions, 1);
}

#[tokio::test]
async fn test_failed_update_leaves_record_unchanged() {
    let (actor, client) = ResourceActor::<Dish>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(dish("mee goreng")).await.unwrap();
    let result = client.update(id, DishUpdate { name: Some(String::new()) }).await;
    assert!(result.is_err());
    assert_eq!(client.get(id).await.unwrap().unwrap().name, "mee goreng");
}

#[tokio::test]
async fn test_create_batch_is_all_or_nothing() {
    let (actor, client) = ResourceActor::<Dish>::new(10);
    tokio::spawn(actor.run(()));

    let result = client
        .create_batch(vec![dish("teh tarik"), dish(""), dish("kopi")])
        .await;
    assert!(result.is_err());
    assert!(client.query(Filter::all()).await.unwrap().is_empty());

    let ids = client
        .create_batch(vec![dish("teh tarik"), dish("kopi")])
        .await
        .unwrap();
    assert_eq!(ids.len(), 2);
    assert!(ids[0] < ids[1]);
}

#[tokio::test]
async fn test_query_filters_in_id_order() {
    let (actor, client) = ResourceActor::<Dish>::new(10);
    tokio::spawn(actor.run(()));

    for name in ["cendol", "ais kacang", "char kway teow", "cucur"] {
        client.create(dish(name)).await.unwrap();
    }

    let starts_with_c = client
        .query(Filter::new(|d: &Dish| d.name.starts_with('c')))
        .await
        .unwrap();
    let names: Vec<_> = starts_with_c.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["cendol", "char kway teow", "cucur"]);
}

#[tokio::test]
async fn test_missing_record_and_closed_actor() {
    let (actor, client) = ResourceActor::<Dish>::new(10);
    let handle = tokio::spawn(actor.run(()));

    let err = client.perform_action(42, DishAction::Cook(1)).await.unwrap_err();
    assert!(matches!(err, FrameworkError::NotFound(ref id) if id == "42"));

    handle.abort();
    let _ = handle.await;
    let err = client.get(1).await.unwrap_err();
    assert!(err.is_unavailable());
}
