use crate::datatype::Entity;
use crate::index::NetexIndex;
use crate::model::{Notice, NoticeAssignment};

use super::Diagnostics;

/// Notices and their assignments, hosted by both service and timetable frames.
#[derive(Debug, Default)]
pub(super) struct NoticeParser {
    notices: Vec<Notice>,
    notice_assignments: Vec<NoticeAssignment>,
}
impl NoticeParser {
    pub(super) fn parse_notices(&mut self, notices: &[Notice]) {
        self.notices.extend_from_slice(notices);
    }
    pub(super) fn parse_notice_assignments(
        &mut self,
        assignments: &[NoticeAssignment],
        diagnostics: &mut Diagnostics,
    ) {
        for assignment in assignments {
            let mut valid = true;
            if assignment.noticed_object_ref.is_none() {
                diagnostics.record_dropped(
                    NoticeAssignment::KIND,
                    &assignment.id,
                    "missing noticedObjectRef",
                );
                valid = false;
            }
            if assignment.notice_ref.is_none() && assignment.notice.is_none() {
                diagnostics.record_dropped(
                    NoticeAssignment::KIND,
                    &assignment.id,
                    "has neither notice nor noticeRef",
                );
                valid = false;
            }
            if valid {
                self.notice_assignments.push(assignment.clone());
            }
        }
    }
    pub(super) fn commit(self, index: &NetexIndex) {
        index.notices.put_all(self.notices);
        index.notice_assignments.put_all(self.notice_assignments);
    }
}
