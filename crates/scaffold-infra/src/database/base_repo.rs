use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseTransaction, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, PrimaryKeyTrait, QuerySelect, Select, SqlErr,
};

use scaffold_core::RepoError;
use scaffold_core::pagination::{Page, PageRequest};
use scaffold_core::ports::BaseRepository;

/// Generic SeaORM repository implementation.
///
/// Holds no connection: every call borrows the caller's transaction.
pub struct SeaOrmBaseRepository<E>
where
    E: EntityTrait,
{
    _entity: PhantomData<E>,
}

impl<E> SeaOrmBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new() -> Self {
        Self {
            _entity: PhantomData,
        }
    }
}

impl<E> Default for SeaOrmBaseRepository<E>
where
    E: EntityTrait,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for SeaOrmBaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Into<E::ActiveModel> + Send + Sync + 'static,
{
    type Session = DatabaseTransaction;

    async fn by_id(&self, session: &DatabaseTransaction, id: ID) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id).one(session).await.map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, session: &DatabaseTransaction, entity: T) -> Result<T, RepoError> {
        let active_model: E::ActiveModel = entity.into();

        // Every column is set, so an update touching no row means the key
        // is new.
        let model = match active_model.clone().update(session).await {
            Ok(model) => model,
            Err(DbErr::RecordNotUpdated) => {
                active_model.insert(session).await.map_err(map_db_err)?
            }
            Err(e) => return Err(map_db_err(e)),
        };

        Ok(model.into())
    }

    async fn delete(&self, session: &DatabaseTransaction, id: ID) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(session)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

/// Translate a driver error, keeping constraint violations distinct.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => RepoError::Constraint(detail),
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => RepoError::Constraint(detail),
        _ => match err {
            DbErr::Conn(e) => RepoError::Connection(e.to_string()),
            DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
            other => RepoError::Query(other.to_string()),
        },
    }
}

/// Run `select` as one page: count (unless the caller supplied the total),
/// then fetch the offset/limit slice.
pub(crate) async fn paginate<E>(
    session: &DatabaseTransaction,
    select: Select<E>,
    request: &PageRequest,
) -> Result<Page<E::Model>, RepoError>
where
    E: EntityTrait,
    E::Model: Sync,
{
    let item_count = match request.item_count {
        Some(count) => count,
        None => select.clone().count(session).await.map_err(map_db_err)?,
    };

    let window = request.window(item_count);
    let items = if window.is_empty() {
        Vec::new()
    } else {
        select
            .offset(window.offset())
            .limit(window.limit())
            .all(session)
            .await
            .map_err(map_db_err)?
    };

    tracing::debug!(
        page = window.page,
        items_per_page = window.items_per_page,
        item_count,
        fetched = items.len(),
        "Fetched page"
    );

    Ok(window.into_page(items, request.extra.clone()))
}
