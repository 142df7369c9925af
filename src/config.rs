/// Header line of the normalized output file.
pub const OUTPUT_HEADER: &str =
    "Timestamp,Address,ZIP,FullName,FooDuration,BarDuration,TotalDuration,Notes";

/// One CSV row. A `None` field means the input line never supplied that
/// position; it normalizes as a no-op and serializes as an empty segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub timestamp: Option<String>,
    pub address: Option<String>,
    pub zipcode: Option<String>,
    pub full_name: Option<String>,
    pub foo_duration: Option<String>,
    pub bar_duration: Option<String>,
    pub total_duration: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Timestamp,
    Address,
    Zipcode,
    FullName,
    FooDuration,
    BarDuration,
    TotalDuration,
    Notes,
}

impl Field {
    /// Column order of the serialized line, matching `OUTPUT_HEADER`.
    pub const ORDER: [Field; 8] = [
        Field::Timestamp,
        Field::Address,
        Field::Zipcode,
        Field::FullName,
        Field::FooDuration,
        Field::BarDuration,
        Field::TotalDuration,
        Field::Notes,
    ];
}

impl Record {
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Timestamp => self.timestamp.as_deref(),
            Field::Address => self.address.as_deref(),
            Field::Zipcode => self.zipcode.as_deref(),
            Field::FullName => self.full_name.as_deref(),
            Field::FooDuration => self.foo_duration.as_deref(),
            Field::BarDuration => self.bar_duration.as_deref(),
            Field::TotalDuration => self.total_duration.as_deref(),
            Field::Notes => self.notes.as_deref(),
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Timestamp => &mut self.timestamp,
            Field::Address => &mut self.address,
            Field::Zipcode => &mut self.zipcode,
            Field::FullName => &mut self.full_name,
            Field::FooDuration => &mut self.foo_duration,
            Field::BarDuration => &mut self.bar_duration,
            Field::TotalDuration => &mut self.total_duration,
            Field::Notes => &mut self.notes,
        };
        *slot = Some(value);
    }

    /// Join the fields with commas in column order. No quoting or escaping
    /// is applied, even to values that themselves contain commas.
    pub fn to_csv_line(&self) -> String {
        let mut line = String::new();
        for (i, field) in Field::ORDER.iter().enumerate() {
            if i > 0 {
                line.push(',');
            }
            line.push_str(self.get(*field).unwrap_or(""));
        }
        line
    }
}
