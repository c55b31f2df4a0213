//! Domain model capabilities consumed by the transformation engine
//!
//! The engine never owns models. The host application implements [`Model`]
//! for its domain types and hands them over as plain references, shared
//! [`ModelRef`] handles, or a [`Paginator`] page.

use crate::resolve::Transformable;
use crate::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Flat output mapping produced by one transformation
pub type Fields = Map<String, Value>;

/// Shared handle to a model, as returned by relation accessors
pub type ModelRef = Rc<dyn Model>;

/// Upcast helper so `dyn Model` can be downcast to its concrete type
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A domain object the engine can transform
pub trait Model: AsAny + fmt::Debug {
    /// Runtime type name, used as the registry key.
    ///
    /// Defaults to the fully qualified Rust type name.
    fn model_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Stable identity (usually the primary key) used for cycle detection
    fn model_key(&self) -> Option<String> {
        None
    }

    /// Read a named relation. `None` means the model has no such relation.
    fn relation(&self, name: &str) -> Option<Related> {
        let _ = name;
        None
    }

    /// Plain mapping of the model's attributes, used when no transformer applies
    fn to_plain(&self) -> Result<Fields>;

    /// Expose the transformable capability, if the model has one
    fn as_transformable(&self) -> Option<&dyn Transformable> {
        None
    }
}

impl<'a> dyn Model + 'a {
    /// Downcast to the concrete model type
    pub fn downcast_ref<T: Model + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Whether the model is of type `T`
    pub fn is<T: Model + 'static>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// Serialize any `Serialize` value into a field mapping.
///
/// Intended for `Model::to_plain` implementations.
pub fn fields_of<T: Serialize + ?Sized>(value: &T) -> Result<Fields> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(Error::configuration(format!(
            "plain conversion produced {} instead of an object",
            crate::error::ValueKind::of(&other)
        ))),
    }
}

/// Value yielded by a relation accessor
#[derive(Debug, Clone)]
pub enum Related {
    /// To-one relation
    One(ModelRef),
    /// To-many relation, assumed homogeneous
    Many(Vec<ModelRef>),
    /// To-one relation with nothing on the other side
    Null,
}

impl Related {
    /// The item whose type decides which transformer handles the relation
    pub fn representative(&self) -> Option<&dyn Model> {
        match self {
            Related::One(model) => Some(&**model),
            Related::Many(models) => models.first().map(|model| &**model),
            Related::Null => None,
        }
    }

    /// Number of related models
    pub fn len(&self) -> usize {
        match self {
            Related::One(_) => 1,
            Related::Many(models) => models.len(),
            Related::Null => 0,
        }
    }

    /// Whether there is nothing on the other side
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Subject view for transforming the related value, `None` for `Null`
    pub fn subject(&self) -> Option<Subject<'_>> {
        match self {
            Related::One(model) => Some(Subject::One(&**model)),
            Related::Many(models) => Some(Subject::Many(models)),
            Related::Null => None,
        }
    }

    /// Plain conversion of the related value, bypassing transformers
    pub fn to_plain(&self) -> Result<Value> {
        match self {
            Related::One(model) => Ok(Value::Object(model.to_plain()?)),
            Related::Many(models) => models
                .iter()
                .map(|model| model.to_plain().map(Value::Object))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            Related::Null => Ok(Value::Null),
        }
    }
}

impl From<ModelRef> for Related {
    fn from(model: ModelRef) -> Self {
        Related::One(model)
    }
}

impl From<Vec<ModelRef>> for Related {
    fn from(models: Vec<ModelRef>) -> Self {
        Related::Many(models)
    }
}

impl From<Option<ModelRef>> for Related {
    fn from(model: Option<ModelRef>) -> Self {
        model.map_or(Related::Null, Related::One)
    }
}

/// Paginated result exposing the items of its current page
pub trait Paginator: fmt::Debug {
    /// Items of the current page
    fn items(&self) -> &[ModelRef];

    /// One-based page number
    fn current_page(&self) -> usize {
        1
    }

    /// Page size
    fn per_page(&self) -> usize {
        self.items().len()
    }

    /// Total number of items across all pages, when known
    fn total(&self) -> Option<usize> {
        None
    }
}

/// Length-aware page of models
#[derive(Debug, Clone)]
pub struct Page {
    items: Vec<ModelRef>,
    current_page: usize,
    per_page: usize,
    total: Option<usize>,
}

impl Page {
    /// Create a page from already sliced items
    pub fn new(items: Vec<ModelRef>, current_page: usize, per_page: usize) -> Self {
        Self {
            items,
            current_page: current_page.max(1),
            per_page,
            total: None,
        }
    }

    /// Set the total item count
    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }

    /// Slice page `page` (one-based) of `per_page` items out of `all`
    pub fn paginate(all: &[ModelRef], page: usize, per_page: usize) -> Self {
        let page = page.max(1);
        let start = (page - 1).saturating_mul(per_page).min(all.len());
        let end = start.saturating_add(per_page).min(all.len());

        Self::new(all[start..end].to_vec(), page, per_page).with_total(all.len())
    }

    /// Last page number, when the total is known
    pub fn last_page(&self) -> Option<usize> {
        let total = self.total?;
        if self.per_page == 0 {
            return Some(1);
        }
        Some(total.div_ceil(self.per_page).max(1))
    }
}

impl Paginator for Page {
    fn items(&self) -> &[ModelRef] {
        &self.items
    }

    fn current_page(&self) -> usize {
        self.current_page
    }

    fn per_page(&self) -> usize {
        self.per_page
    }

    fn total(&self) -> Option<usize> {
        self.total
    }
}

/// Input of a transform call
#[derive(Debug, Clone, Copy)]
pub enum Subject<'a> {
    /// A single model
    One(&'a dyn Model),
    /// An ordered, homogeneous batch
    Many(&'a [ModelRef]),
    /// A paginated result, transformed as its current page
    Page(&'a dyn Paginator),
}

impl<'a> Subject<'a> {
    /// Wrap a single model
    pub fn one(model: &'a dyn Model) -> Self {
        Subject::One(model)
    }

    /// Wrap a batch of models
    pub fn many(models: &'a [ModelRef]) -> Self {
        Subject::Many(models)
    }

    /// Wrap a paginated result
    pub fn page(page: &'a dyn Paginator) -> Self {
        Subject::Page(page)
    }

    /// Collapse paginated input into its page items
    pub fn normalize(self) -> Self {
        match self {
            Subject::Page(page) => Subject::Many(page.items()),
            other => other,
        }
    }
}

impl<'a> From<&'a dyn Model> for Subject<'a> {
    fn from(model: &'a dyn Model) -> Self {
        Subject::One(model)
    }
}

impl<'a> From<&'a ModelRef> for Subject<'a> {
    fn from(model: &'a ModelRef) -> Self {
        Subject::One(&**model)
    }
}

impl<'a> From<&'a [ModelRef]> for Subject<'a> {
    fn from(models: &'a [ModelRef]) -> Self {
        Subject::Many(models)
    }
}

impl<'a> From<&'a Vec<ModelRef>> for Subject<'a> {
    fn from(models: &'a Vec<ModelRef>) -> Self {
        Subject::Many(models)
    }
}

impl<'a> From<&'a Page> for Subject<'a> {
    fn from(page: &'a Page) -> Self {
        Subject::Page(page)
    }
}

/// Identity of a model along one recursion path
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Identity {
    Keyed { model: &'static str, key: String },
    Address { model: &'static str, address: usize },
}

impl Identity {
    pub(crate) fn of(model: &dyn Model) -> Self {
        match model.model_key() {
            Some(key) => Identity::Keyed {
                model: model.model_name(),
                key,
            },
            None => Identity::Address {
                model: model.model_name(),
                address: std::ptr::from_ref(model).cast::<()>() as usize,
            },
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Keyed { model, key } => write!(f, "{}#{}", model, key),
            Identity::Address { model, address } => write!(f, "{}@{:#x}", model, address),
        }
    }
}
