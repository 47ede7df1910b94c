#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    DateTime,
    Condition,
    Temperature,
    Humidity,
    Pressure,
}

impl SortField {
    /// Wire value for the `sort` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::DateTime => "datetime",
            SortField::Condition => "conds",
            SortField::Temperature => "tempm",
            SortField::Humidity => "hum",
            SortField::Pressure => "pressurem",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortField::DateTime => "Date",
            SortField::Condition => "Condition",
            SortField::Temperature => "Temperature",
            SortField::Humidity => "Humidity",
            SortField::Pressure => "Pressure",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Client-held request state: which page to ask for and how to sort it.
/// Mutated only by the controller in response to user commands.
#[derive(Debug, Clone, Copy)]
pub struct Session {
    pub page: u32,
    pub per_page: u32,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
}

impl Session {
    pub fn new(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page,
            sort_field: SortField::DateTime,
            sort_direction: SortDirection::Desc,
        }
    }

    /// Sorting on the active field flips the direction; any other field
    /// becomes the active one, descending first.
    pub fn sort_by(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Desc;
        }
    }

    pub fn go_to(&mut self, page: u32) {
        self.page = page.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_field_twice_restores_direction() {
        let mut session = Session::new(20);
        let before = session.sort_direction;
        session.sort_by(SortField::DateTime);
        assert_eq!(session.sort_direction, SortDirection::Asc);
        session.sort_by(SortField::DateTime);
        assert_eq!(session.sort_direction, before);
    }

    #[test]
    fn new_field_resets_to_descending() {
        let mut session = Session::new(20);
        session.sort_by(SortField::DateTime); // now ascending
        session.sort_by(SortField::Temperature);
        assert_eq!(session.sort_field, SortField::Temperature);
        assert_eq!(session.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn page_floor_is_one() {
        let mut session = Session::new(20);
        session.go_to(0);
        assert_eq!(session.page, 1);
        session.go_to(7);
        assert_eq!(session.page, 7);
    }

    #[test]
    fn wire_values() {
        assert_eq!(SortField::DateTime.as_str(), "datetime");
        assert_eq!(SortField::Pressure.as_str(), "pressurem");
        assert_eq!(SortDirection::Desc.as_str(), "desc");
        assert_eq!(SortDirection::Desc.toggled(), SortDirection::Asc);
    }
}
