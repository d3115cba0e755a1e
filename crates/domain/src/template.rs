//! Default SAM template written when the working directory has none.

/// Route polled for readiness.
pub const HEALTH_ROUTE: &str = "/api/health";

/// Route that executes an encoded snippet.
pub const EXEC_ROUTE: &str = "/api/exec/{_src}";

/// Minimal template: one function, a health route and an exec route.
pub const DEFAULT_TEMPLATE: &str = r"AWSTemplateFormatVersion: '2010-09-09'
Transform: AWS::Serverless-2016-10-31

Resources:
  BashReplFunction:
    Type: AWS::Serverless::Function
    Properties:
      CodeUri: .
      Handler: function.handler
      Runtime: provided.al2
      Events:
        Health:
          Type: Api
          Properties:
            Path: /api/health
            Method: GET
        Exec:
          Type: Api
          Properties:
            Path: /api/exec/{_src}
            Method: GET
";
