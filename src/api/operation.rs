//! Names and fixed response texts of the HTTP operations.

/// One bound route of the task API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `GET /task`
    List,
    /// `POST /task/store`
    Create,
    /// `GET /task/edit/{id}`
    FetchOne,
    /// `PUT /task/update/{id}`
    Update,
    /// `DELETE /task/delete/{id}`
    Delete,
    /// `PATCH /task/status/{id}`
    ToggleChecked,
}

impl Operation {
    /// Operation name used in log events.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Create => "create",
            Self::FetchOne => "fetch_one",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::ToggleChecked => "toggle_checked",
        }
    }

    /// The single verb accepted on the operation's path.
    #[must_use]
    pub const fn allowed_method(self) -> &'static str {
        match self {
            Self::List | Self::FetchOne => "GET",
            Self::Create => "POST",
            Self::Update => "PUT",
            Self::Delete => "DELETE",
            Self::ToggleChecked => "PATCH",
        }
    }

    /// Body message of a 405 response on this path.
    #[must_use]
    pub const fn method_hint(self) -> &'static str {
        match self {
            Self::List => "Method not allowed. Use GET to list tasks.",
            Self::Create => "Method not allowed. Use POST to create a task.",
            Self::FetchOne => "Method not allowed. Use GET to fetch a task.",
            Self::Update => "Method not allowed. Use PUT to update a task.",
            Self::Delete => "Method not allowed. Use DELETE to remove a task.",
            Self::ToggleChecked => "Method not allowed. Use PATCH to toggle a task.",
        }
    }

    /// Sanitised body message when the store fails.
    #[must_use]
    pub const fn store_failure(self) -> &'static str {
        match self {
            Self::List => "Failed to fetch tasks from the database.",
            Self::Create => "Could not create the task.",
            Self::FetchOne => "Failed to fetch the task from the database.",
            Self::Update => "Could not update the task.",
            Self::Delete => "Could not delete the task.",
            Self::ToggleChecked => "Could not update the task status.",
        }
    }
}
