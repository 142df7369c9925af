use crate::config::Record;
use memchr::memchr_iter;

/// Longest pre-quote prefix (trailing comma stripped) that can still be a
/// bare timestamp. Decides whether a quoted field is the address or the
/// notes column.
const MAX_TIMESTAMP_LEN: usize = 21;

/// Parse the whole input text into records. The first row is the input's
/// header and carries no record; blank rows are skipped wherever they occur.
pub fn parse(input: &str) -> Vec<Record> {
    let bytes = input.as_bytes();
    let mut records = Vec::with_capacity(bytes.len() / 80);
    let mut start = 0;
    let mut row = 0usize;
    for nl in memchr_iter(b'\n', bytes) {
        push_row(&input[start..nl], row, &mut records);
        row += 1;
        start = nl + 1;
    }
    if start < bytes.len() {
        push_row(&input[start..], row, &mut records);
    }
    records
}

fn push_row(line: &str, row: usize, out: &mut Vec<Record>) {
    if row == 0 || line.is_empty() {
        return;
    }
    out.push(parse_line(line));
}

/// Parse one body line into a record.
///
/// At most one field may carry embedded commas (address or notes), marked by
/// quotation marks. Which of the two it is gets decided by the length of the
/// text in front of the first quote: a bare timestamp fits in
/// `MAX_TIMESTAMP_LEN` characters, a full timestamp-through-totalDuration
/// prefix never does. Lines where both fields contain commas, or where the
/// prefix length is borderline, misclassify silently.
pub fn parse_line(line: &str) -> Record {
    let quoted: Vec<&str> = line.split('"').collect();
    if quoted.len() == 1 {
        return from_unquoted(line);
    }

    let lead = quoted[0].strip_suffix(',').unwrap_or(quoted[0]);
    if lead.len() <= MAX_TIMESTAMP_LEN {
        from_quoted_address(lead, &quoted)
    } else {
        from_quoted_notes(lead, &quoted)
    }
}

/// Common case, no quotes anywhere: the commas are all separators.
fn from_unquoted(line: &str) -> Record {
    let mut fields = line.split(',');
    Record {
        timestamp: next_field(&mut fields),
        address: next_field(&mut fields),
        zipcode: next_field(&mut fields),
        full_name: next_field(&mut fields),
        foo_duration: next_field(&mut fields),
        bar_duration: next_field(&mut fields),
        total_duration: next_field(&mut fields),
        notes: next_field(&mut fields),
    }
}

/// Layout `timestamp,"address, with, commas",zipcode,...,notes`: the text
/// between the first two quotes is the address verbatim, the remainder
/// supplies the last six fields.
fn from_quoted_address(timestamp: &str, quoted: &[&str]) -> Record {
    let mut rest = quoted.get(2).copied().unwrap_or("").split(',');
    // the remainder opens with the comma that closed the quoted field
    rest.next();
    Record {
        timestamp: Some(timestamp.to_owned()),
        address: quoted.get(1).map(|s| s.to_string()),
        zipcode: next_field(&mut rest),
        full_name: next_field(&mut rest),
        foo_duration: next_field(&mut rest),
        bar_duration: next_field(&mut rest),
        total_duration: next_field(&mut rest),
        notes: next_field(&mut rest),
    }
}

/// Layout `timestamp,address,...,totalDuration,"notes, with, commas"`: the
/// pre-quote text supplies the first seven fields, the quoted text is the
/// notes verbatim.
fn from_quoted_notes(lead: &str, quoted: &[&str]) -> Record {
    let mut fields = lead.split(',');
    Record {
        timestamp: next_field(&mut fields),
        address: next_field(&mut fields),
        zipcode: next_field(&mut fields),
        full_name: next_field(&mut fields),
        foo_duration: next_field(&mut fields),
        bar_duration: next_field(&mut fields),
        total_duration: next_field(&mut fields),
        notes: quoted.get(1).map(|s| s.to_string()),
    }
}

fn next_field(fields: &mut std::str::Split<'_, char>) -> Option<String> {
    fields.next().map(str::to_owned)
}
